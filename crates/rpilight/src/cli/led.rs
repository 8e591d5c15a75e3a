//! `on` / `off` / `set` subcommands — call `ledControl` on the running service.

use rpilight_lib::Rpilight;
use rpilight_lib::ipc::RpilightProxy;
use rpilight_lib::service::instance_name;

use super::{LedControlOutput, Options, Result, load_config, print_json};

pub(super) fn cmd_led(state: i32, opts: &Options) -> Result<()> {
    let config = load_config(opts.config.as_deref());
    let proxy =
        RpilightProxy::wait_for_service(&config.socket_dir(), &instance_name(), opts.wait)?;
    log::debug!("service found at {}", proxy.socket_path().display());

    log::info!("Setting LED to: {state}");
    let success = proxy.led_control(state)?;

    if opts.json {
        return print_json(&LedControlOutput { state, success });
    }
    println!(
        "LED control result: {}",
        if success { "success" } else { "failure" }
    );
    Ok(())
}
