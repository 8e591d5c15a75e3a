//! rpilight — LED control service for the Raspberry Pi activity LED.

pub mod config;
pub mod error;
pub mod ipc;
pub mod led;
pub mod service;
pub mod status;

pub use error::RpilightError;
pub use service::{Rpilight, RpilightService};
pub use status::{Status, StatusResult};
