//! rpilight-cli — switch the activity LED through a running rpilightd.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "rpilight-cli",
    version,
    about = "Switch the Raspberry Pi activity LED through rpilightd"
)]
struct Args {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seconds to wait for the service to come up
    #[arg(long, global = true, default_value_t = 5)]
    wait: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = cli::Options {
        json: args.json,
        config: args.config,
        wait: Duration::from_secs(args.wait),
    };

    if let Err(e) = cli::run(args.command, &opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
