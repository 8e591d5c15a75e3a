//! Service host — socket directory init, instance registration, worker pool.
//!
//! Bootstrap order mirrors a binder service process: [`ServiceHost::init`]
//! (driver binding), [`ServiceHost::set_thread_pool_max_thread_count`],
//! [`ServiceHost::add_service`], then [`ServiceHost::join_thread_pool`], which
//! only returns if serving becomes impossible.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

use interprocess::local_socket::{LocalSocketListener, LocalSocketStream};

use super::{IpcError, Result, protocol, socket_path};
use crate::service::Rpilight;

/// Worker threads servicing incoming calls, unless configured otherwise.
pub const DEFAULT_MAX_THREADS: usize = 2;

struct Registered {
    instance: String,
    socket_path: PathBuf,
    listener: LocalSocketListener,
    service: Arc<dyn Rpilight>,
}

impl Drop for Registered {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

/// Hosts one service instance on a local socket.
pub struct ServiceHost {
    socket_dir: PathBuf,
    max_threads: usize,
    registered: Option<Registered>,
}

impl ServiceHost {
    /// Prepare the socket directory. Fails with [`IpcError::Init`] if it cannot be created.
    pub fn init(socket_dir: impl Into<PathBuf>) -> Result<Self> {
        let socket_dir = socket_dir.into();
        std::fs::create_dir_all(&socket_dir)
            .map_err(|e| IpcError::Init(format!("{}: {e}", socket_dir.display())))?;
        log::debug!("IPC socket directory: {}", socket_dir.display());
        Ok(ServiceHost {
            socket_dir,
            max_threads: DEFAULT_MAX_THREADS,
            registered: None,
        })
    }

    /// Bound the worker pool. Zero is treated as one.
    pub fn set_thread_pool_max_thread_count(&mut self, max_threads: usize) {
        self.max_threads = max_threads.max(1);
    }

    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    pub fn socket_dir(&self) -> &Path {
        &self.socket_dir
    }

    /// Socket of the registered instance, if any.
    pub fn socket_path(&self) -> Option<&Path> {
        self.registered.as_ref().map(|r| r.socket_path.as_path())
    }

    /// Register `service` under `instance` and start listening on its socket.
    ///
    /// A socket that still answers belongs to a live process and is a
    /// registration failure; a stale socket file is removed and rebound.
    pub fn add_service(&mut self, instance: &str, service: Arc<dyn Rpilight>) -> Result<PathBuf> {
        if let Some(reg) = &self.registered {
            return Err(IpcError::AlreadyRegistered(reg.instance.clone()));
        }
        let path = socket_path(&self.socket_dir, instance);
        let listener = claim_socket(&path)?;
        log::info!("Registered {instance} at {}", path.display());
        self.registered = Some(Registered {
            instance: instance.to_string(),
            socket_path: path.clone(),
            listener,
            service,
        });
        Ok(path)
    }

    /// Start the worker pool and accept calls on the current thread.
    ///
    /// Never returns while serving works; the returned error says why it stopped.
    pub fn join_thread_pool(self) -> IpcError {
        let Some(reg) = self.registered else {
            return IpcError::NotRegistered;
        };

        let (tx, rx) = mpsc::sync_channel::<LocalSocketStream>(self.max_threads);
        let rx = Arc::new(Mutex::new(rx));
        for i in 0..self.max_threads {
            let rx = Arc::clone(&rx);
            let service = Arc::clone(&reg.service);
            let spawned = thread::Builder::new()
                .name(format!("rpilight-pool-{i}"))
                .spawn(move || worker_loop(&rx, service.as_ref()));
            if let Err(e) = spawned {
                return IpcError::Pool(format!("spawn worker {i}: {e}"));
            }
        }
        log::debug!("{} worker threads serving {}", self.max_threads, reg.instance);

        for conn in reg.listener.incoming() {
            match conn {
                Ok(stream) => {
                    if tx.send(stream).is_err() {
                        return IpcError::Pool("all worker threads exited".into());
                    }
                }
                Err(e) => log::warn!("Incoming connection failed: {e}"),
            }
        }
        IpcError::Io(io::Error::other(format!(
            "listener for {} closed",
            reg.instance
        )))
    }
}

/// Bind `path`, clearing a stale socket file first.
fn claim_socket(path: &Path) -> Result<LocalSocketListener> {
    if path.exists() {
        if LocalSocketStream::connect(path).is_ok() {
            return Err(IpcError::Registration(format!(
                "{}: already served by another process",
                path.display()
            )));
        }
        log::debug!("Removing stale socket {}", path.display());
        std::fs::remove_file(path)
            .map_err(|e| IpcError::Registration(format!("{}: {e}", path.display())))?;
    }
    LocalSocketListener::bind(path)
        .map_err(|e| IpcError::Registration(format!("{}: {e}", path.display())))
}

fn worker_loop(rx: &Mutex<Receiver<LocalSocketStream>>, service: &dyn Rpilight) {
    loop {
        let next = match rx.lock() {
            Ok(guard) => guard.recv(),
            Err(_) => return,
        };
        let Ok(stream) = next else {
            return;
        };
        if let Err(e) = serve_connection(stream, service) {
            log::warn!("Connection error: {e}");
        }
    }
}

/// Answer the first request on a connection, then close it.
///
/// A worker is held for one call only; the peer cannot pin it by keeping the
/// connection open.
fn serve_connection<S: Read + Write>(stream: S, service: &dyn Rpilight) -> io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        if !line.trim().is_empty() {
            break;
        }
    }
    let reply = protocol::dispatch(service, line.trim_end());
    protocol::write_message(reader.get_mut(), &reply)
}
