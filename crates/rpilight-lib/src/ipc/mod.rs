//! Inter-process transport — local-socket service host and client proxy.
//!
//! Each registered instance owns one socket file under the socket directory.
//! Requests and replies are newline-delimited JSON (see [`protocol`]).

pub mod backoff;
pub mod client;
pub mod protocol;
pub mod server;

use std::fmt;
use std::path::{Path, PathBuf};

pub use client::RpilightProxy;
pub use server::{DEFAULT_MAX_THREADS, ServiceHost};

/// Transport setup and registration errors.
///
/// String payloads follow the convention **"context: details"**, where
/// *context* is usually a socket path or instance name.
#[derive(Debug)]
pub enum IpcError {
    /// The socket directory could not be prepared.
    Init(String),
    /// The instance socket could not be claimed.
    Registration(String),
    /// The host already serves an instance.
    AlreadyRegistered(String),
    /// `join_thread_pool` was called before any service was registered.
    NotRegistered,
    /// No service answered at the instance socket in time.
    ServiceUnavailable(String),
    /// Worker pool failure (spawn error, all workers gone).
    Pool(String),
    Io(std::io::Error),
}

impl fmt::Display for IpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcError::Init(e) => write!(f, "IPC init failed: {e}"),
            IpcError::Registration(e) => write!(f, "Service registration failed: {e}"),
            IpcError::AlreadyRegistered(instance) => {
                write!(f, "Host already serves {instance}")
            }
            IpcError::NotRegistered => write!(f, "No service registered"),
            IpcError::ServiceUnavailable(e) => write!(f, "Service unavailable: {e}"),
            IpcError::Pool(e) => write!(f, "Thread pool error: {e}"),
            IpcError::Io(e) => write!(f, "IPC I/O error: {e}"),
        }
    }
}

impl std::error::Error for IpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IpcError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IpcError {
    fn from(e: std::io::Error) -> Self {
        IpcError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, IpcError>;

/// Socket file for an instance: `/` in the instance name becomes `@`.
///
/// `android.hardware.rpilight.IRpilight/default` →
/// `<dir>/android.hardware.rpilight.IRpilight@default.sock`
pub fn socket_path(socket_dir: &Path, instance: &str) -> PathBuf {
    socket_dir.join(format!("{}.sock", instance.replace('/', "@")))
}
