//! Client-side proxy for a registered `IRpilight` instance.

use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use interprocess::local_socket::LocalSocketStream;

use super::backoff::Backoff;
use super::protocol::{self, Reply, Request, Transaction};
use super::{IpcError, Result, socket_path};
use crate::service::Rpilight;
use crate::status::{Status, StatusResult};

/// Remote handle to the LED service. Each call uses its own connection.
#[derive(Debug, Clone)]
pub struct RpilightProxy {
    socket_path: PathBuf,
}

impl RpilightProxy {
    /// Proxy for `instance` under `socket_dir`. Does not check that the service is up.
    pub fn new(socket_dir: &Path, instance: &str) -> Self {
        RpilightProxy {
            socket_path: socket_path(socket_dir, instance),
        }
    }

    /// Block until the instance accepts connections, or `timeout` elapses.
    ///
    /// A zero timeout makes exactly one attempt.
    pub fn wait_for_service(socket_dir: &Path, instance: &str, timeout: Duration) -> Result<Self> {
        let proxy = Self::new(socket_dir, instance);
        let deadline = Instant::now() + timeout;
        let mut backoff = Backoff::default();

        loop {
            let err = match LocalSocketStream::connect(proxy.socket_path.as_path()) {
                Ok(_) => return Ok(proxy),
                Err(e) => e,
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(IpcError::ServiceUnavailable(format!(
                    "{instance} at {}: {err}",
                    proxy.socket_path.display()
                )));
            }
            let delay = backoff.next_delay().min(remaining);
            log::debug!(
                "{instance} not up yet: {err} (attempt {}, retry in {:.2}s)",
                backoff.attempts(),
                delay.as_secs_f64()
            );
            thread::sleep(delay);
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Send one request and wait for its reply on a fresh connection.
    fn transact(&self, request: Request) -> StatusResult<Reply> {
        let dead = |e: io::Error| Status::DeadObject(format!("{}: {e}", self.socket_path.display()));

        let mut stream = LocalSocketStream::connect(self.socket_path.as_path()).map_err(dead)?;
        protocol::write_message(&mut stream, &Transaction::new(request)).map_err(dead)?;

        let mut reader = BufReader::new(stream);
        match protocol::read_message::<_, Reply>(&mut reader).map_err(dead)? {
            Some(reply) => Ok(reply),
            None => Err(Status::DeadObject(format!(
                "{}: connection closed before reply",
                self.socket_path.display()
            ))),
        }
    }
}

impl Rpilight for RpilightProxy {
    fn led_control(&self, state: i32) -> StatusResult<bool> {
        match self.transact(Request::LedControl { state })? {
            Reply::Ok { success } => Ok(success),
            Reply::Error(status) => Err(status),
        }
    }
}
