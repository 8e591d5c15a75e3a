//! Requested LED state and the literal values written for it.

use std::fmt;

/// Brightness entry of the activity LED, exposed by the kernel LED class driver.
pub const LED_FILE_PATH: &str = "/sys/class/leds/ACT/brightness";

/// Written when the LED is switched on (full brightness). No trailing newline.
pub const LED_ON_VALUE: &str = "255";

/// Written when the LED is switched off.
pub const LED_OFF_VALUE: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedState {
    On,
    Off,
}

impl LedState {
    /// Coerce a raw request into a state: any positive value means on.
    ///
    /// No range check: `i32::MAX` is "on" and `i32::MIN` is "off".
    pub fn from_request(state: i32) -> Self {
        if state > 0 { LedState::On } else { LedState::Off }
    }

    /// The literal written to the brightness file for this state.
    pub fn value(self) -> &'static str {
        match self {
            LedState::On => LED_ON_VALUE,
            LedState::Off => LED_OFF_VALUE,
        }
    }
}

impl fmt::Display for LedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedState::On => write!(f, "on"),
            LedState::Off => write!(f, "off"),
        }
    }
}
