//! LED control service — the `IRpilight` interface and its sysfs-backed handler.

use crate::led::{self, ControlFile, LedState};
use crate::status::{Status, StatusResult};

/// Interface descriptor; callers look the service up by this name.
pub const DESCRIPTOR: &str = "android.hardware.rpilight.IRpilight";

/// Service-specific code for "device unavailable or I/O failure".
///
/// Open and write failures share this code; the log line tells them apart.
pub const ERROR_DEVICE_IO: i32 = -1;

/// Instance name the service registers under: `<descriptor>/default`.
pub fn instance_name() -> String {
    format!("{DESCRIPTOR}/default")
}

/// The LED control interface.
///
/// Implemented by the in-process handler ([`RpilightService`]) and by the
/// client-side proxy, so callers are agnostic to where the service lives.
pub trait Rpilight: Send + Sync {
    /// Switch the LED on (`state > 0`) or off (anything else).
    ///
    /// Returns `Ok(true)` once the value has been written.
    fn led_control(&self, state: i32) -> StatusResult<bool>;
}

/// Handler that turns `led_control` calls into control-file writes.
#[derive(Debug)]
pub struct RpilightService<C> {
    control: C,
}

impl<C: ControlFile> RpilightService<C> {
    pub fn new(control: C) -> Self {
        RpilightService { control }
    }
}

impl<C: ControlFile + Send + Sync> Rpilight for RpilightService<C> {
    fn led_control(&self, state: i32) -> StatusResult<bool> {
        led::write_state(&self.control, LedState::from_request(state))
            .map_err(|e| Status::service_specific(ERROR_DEVICE_IO, e.to_string()))?;
        Ok(true)
    }
}
