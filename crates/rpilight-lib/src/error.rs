//! Unified error type for the rpilight-lib crate.
//!
//! [`RpilightError`] wraps transport errors (`IpcError`), call outcomes
//! (`Status`) and plain I/O. `From` impls allow `?` to propagate across module
//! boundaries.

use std::fmt;

use crate::ipc::IpcError;
use crate::status::Status;

/// Unified error type for rpilight-lib operations.
#[derive(Debug)]
pub enum RpilightError {
    /// Transport setup, registration or lookup failure.
    Ipc(IpcError),
    /// A service call returned an error status.
    Status(Status),
    /// Standard I/O error (writing command output).
    Io(std::io::Error),
}

impl fmt::Display for RpilightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpilightError::Ipc(e) => write!(f, "{e}"),
            RpilightError::Status(e) => write!(f, "{e}"),
            RpilightError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for RpilightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RpilightError::Ipc(e) => Some(e),
            RpilightError::Status(e) => Some(e),
            RpilightError::Io(e) => Some(e),
        }
    }
}

impl From<IpcError> for RpilightError {
    fn from(e: IpcError) -> Self {
        RpilightError::Ipc(e)
    }
}

impl From<Status> for RpilightError {
    fn from(e: Status) -> Self {
        RpilightError::Status(e)
    }
}

impl From<std::io::Error> for RpilightError {
    fn from(e: std::io::Error) -> Self {
        RpilightError::Io(e)
    }
}

/// Crate-level Result alias using [`RpilightError`].
pub type Result<T> = std::result::Result<T, RpilightError>;
