//! rpilightd — serves `IRpilight/default`, switching the activity LED on request.
//!
//! Runs until killed. Startup failures exit with -1; if the service pool ever
//! returns, the process exits with `EXIT_FAILURE`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use rpilight_lib::config::Config;
use rpilight_lib::ipc::ServiceHost;
use rpilight_lib::led::SysfsControl;
use rpilight_lib::service::{RpilightService, instance_name};

/// Exit status for construction and registration failures.
const EXIT_STARTUP_FAILURE: i32 = -1;

/// Exit status after SIGINT/SIGTERM (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser)]
#[command(
    name = "rpilightd",
    version,
    about = "LED control service for the Raspberry Pi activity LED"
)]
struct Args {
    /// Path to config file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_target(false)
        .init();
}

/// Print to stdout and log as an error, so failures show up with or without a log sink.
fn loge(msg: &str) {
    println!("{msg}");
    log::error!("{msg}");
}

fn load_config(path: Option<&PathBuf>) -> Config {
    match path {
        Some(p) => {
            let (config, warnings) = Config::load_from(p);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    log::info!("Rpilight service is starting");

    let config = load_config(args.config.as_ref());
    if let Err(errors) = config.validate() {
        let source = args
            .config
            .clone()
            .or_else(Config::path)
            .map_or_else(|| "built-in defaults".into(), |p| p.display().to_string());
        loge(&format!("Invalid configuration in {source}"));
        for e in &errors {
            loge(&format!("  {e}"));
        }
        std::process::exit(EXIT_STARTUP_FAILURE);
    }

    let mut host = match ServiceHost::init(config.socket_dir()) {
        Ok(host) => host,
        Err(e) => {
            loge(&e.to_string());
            std::process::exit(EXIT_STARTUP_FAILURE);
        }
    };
    host.set_thread_pool_max_thread_count(config.max_threads);

    let service = Arc::new(RpilightService::new(SysfsControl::new(config.led_path())));
    let instance = instance_name();

    let socket = match host.add_service(&instance, service) {
        Ok(path) => path,
        Err(e) => {
            loge(&instance);
            loge(&e.to_string());
            loge("Failed to register Rpilight service");
            std::process::exit(EXIT_STARTUP_FAILURE);
        }
    };

    if let Err(e) = ctrlc::set_handler(move || {
        let _ = std::fs::remove_file(&socket);
        std::process::exit(EXIT_INTERRUPTED);
    }) {
        log::warn!("could not install signal handler: {e}");
    }

    log::info!("Rpilight service starts to join service pool");
    let err = host.join_thread_pool();

    loge(&format!("Rpilight service pool exited: {err}"));
    ExitCode::FAILURE
}
