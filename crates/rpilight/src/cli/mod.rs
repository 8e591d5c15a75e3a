//! CLI subcommands — LED control and configuration display.

mod config_cmd;
mod led;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Subcommand;
use serde::Serialize;

pub(super) use rpilight_lib::config::Config;
pub(super) use rpilight_lib::error::Result;

const PADDING: usize = 2;

/// Options shared by every subcommand.
pub struct Options {
    pub json: bool,
    pub config: Option<PathBuf>,
    pub wait: Duration,
}

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load config from `custom` if given, else the default path. Parse warnings are logged.
pub(super) fn load_config(custom: Option<&Path>) -> Config {
    match custom {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Pretty JSON to stdout.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{json}");
    Ok(())
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct LedControlOutput {
    pub state: i32,
    pub success: bool,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub service: ServiceJson,
}

#[derive(Serialize)]
pub(super) struct ServiceJson {
    pub instance: String,
    pub socket: String,
    pub socket_exists: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Turn the LED on
    On,

    /// Turn the LED off
    Off,

    /// Send a raw state (> 0 turns the LED on, anything else off)
    Set {
        #[arg(allow_negative_numbers = true)]
        state: i32,
    },

    /// Show current configuration and service socket
    Config,
}

pub fn run(cmd: Command, opts: &Options) -> Result<()> {
    match cmd {
        Command::On => led::cmd_led(1, opts),
        Command::Off => led::cmd_led(0, opts),
        Command::Set { state } => led::cmd_led(state, opts),
        Command::Config => config_cmd::cmd_config(opts),
    }
}
