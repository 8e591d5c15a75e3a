//! `config` subcommand — show current configuration and the service socket.

use rpilight_lib::ipc::socket_path;
use rpilight_lib::service::instance_name;

use super::{
    Config, ConfigOutput, Options, Result, ServiceJson, kv, kv_indent, kv_width, load_config,
    print_json,
};

pub(super) fn cmd_config(opts: &Options) -> Result<()> {
    let config = load_config(opts.config.as_deref());
    let config_path = opts.config.clone().or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());

    let instance = instance_name();
    let socket = socket_path(&config.socket_dir(), &instance);
    let socket_exists = socket.exists();

    if opts.json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            service: ServiceJson {
                instance,
                socket: socket.display().to_string(),
                socket_exists,
            },
        });
    }

    let w = kv_width(
        &["Config file:"],
        &[
            "led_path:",
            "socket_dir:",
            "max_threads:",
            "Instance:",
            "Socket:",
        ],
    );

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("led_path:", &config.led_path, w);
    let socket_dir = if config.socket_dir.trim().is_empty() {
        format!("{} (default)", config.socket_dir().display())
    } else {
        config.socket_dir().display().to_string()
    };
    kv_indent("socket_dir:", socket_dir, w);
    kv_indent("max_threads:", config.max_threads, w);
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::warn!("[config] {e}");
        }
    }
    println!();

    println!("Service:");
    kv_indent("Instance:", &instance, w);
    let status = if socket_exists { "present" } else { "not found" };
    kv_indent("Socket:", format_args!("{} ({status})", socket.display()), w);
    Ok(())
}
