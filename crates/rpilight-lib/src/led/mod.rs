//! LED control — brightness values, control-file access, single-shot writes.

mod control;
mod ops;
mod state;

pub use control::{ControlFile, LedError, Result, SysfsControl, mock};
pub use ops::write_state;
pub use state::{LED_FILE_PATH, LED_OFF_VALUE, LED_ON_VALUE, LedState};
