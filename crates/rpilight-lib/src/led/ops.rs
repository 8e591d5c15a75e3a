//! Single-shot LED write — one open, one write, one close per call.

use std::io::Write;

use super::control::{ControlFile, LedError, Result};
use super::state::LedState;

/// Write the literal for `state` to the control file.
///
/// Acquires a fresh handle, issues exactly one `write`, and releases the handle
/// before the outcome is inspected, so no descriptor outlives the call on any
/// path. Open failures never attempt a write.
pub fn write_state(control: &impl ControlFile, state: LedState) -> Result<()> {
    let path = control.path().display();

    let mut handle = control.open().map_err(|e| {
        log::error!("Failed to open {path}: {e}");
        LedError::OpenFailed(format!("{path}: {e}"))
    })?;

    let value = state.value();
    match state {
        LedState::On => log::info!("Setting LED on ({value})"),
        LedState::Off => log::info!("Setting LED off ({value})"),
    }

    let written = handle.write(value.as_bytes());
    drop(handle);

    match written {
        Ok(n) if n == value.len() => Ok(()),
        Ok(n) => {
            log::error!("Failed to write to {path}: short write ({n} of {} bytes)", value.len());
            Err(LedError::ShortWrite {
                written: n,
                expected: value.len(),
            })
        }
        Err(e) => {
            log::error!("Failed to write to {path}: {e}");
            Err(LedError::WriteFailed(format!("{path}: {e}")))
        }
    }
}
