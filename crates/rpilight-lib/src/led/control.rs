//! Control-file access — trait + sysfs backend + mock.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// ── Error type ──

/// LED control-file errors.
///
/// String payloads follow the convention **"context: details"** where *context*
/// is the control-file path and *details* is the underlying I/O error.
#[derive(Debug)]
pub enum LedError {
    OpenFailed(String),
    WriteFailed(String),
    ShortWrite { written: usize, expected: usize },
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::OpenFailed(e) => write!(f, "Failed to open LED control file: {e}"),
            LedError::WriteFailed(e) => write!(f, "Failed to write LED control file: {e}"),
            LedError::ShortWrite { written, expected } => write!(
                f,
                "Short write to LED control file: {written} of {expected} bytes"
            ),
        }
    }
}

impl std::error::Error for LedError {}

pub type Result<T> = std::result::Result<T, LedError>;

// ── Trait ──

/// A writable text entry that drives an LED.
///
/// `open` hands out a fresh handle on every call; the handle is released when
/// dropped. Implementations must not cache handles between calls.
pub trait ControlFile {
    type Handle: Write;

    fn path(&self) -> &Path;
    fn open(&self) -> io::Result<Self::Handle>;
}

// ── sysfs implementation ──

/// Brightness file of a kernel LED class device, e.g. `/sys/class/leds/ACT/brightness`.
#[derive(Debug, Clone)]
pub struct SysfsControl {
    path: PathBuf,
}

impl SysfsControl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SysfsControl { path: path.into() }
    }
}

impl ControlFile for SysfsControl {
    type Handle = File;

    fn path(&self) -> &Path {
        &self.path
    }

    /// Write-only; the attribute is owned by the driver, so never create or truncate.
    fn open(&self) -> io::Result<File> {
        OpenOptions::new().write(true).open(&self.path)
    }
}

// ── Mock control file for testing ──

/// In-memory control file for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Records every open and write. Clones share state, so a test can keep one
    /// clone for inspection after moving another into a service.
    #[derive(Debug, Clone)]
    pub struct MockControl {
        path: PathBuf,
        /// Bytes of every write call, in order.
        pub writes: Arc<Mutex<Vec<Vec<u8>>>>,
        /// Number of successful opens.
        pub opens: Arc<AtomicUsize>,
        /// Handles currently open (not yet dropped).
        pub live_handles: Arc<AtomicUsize>,
        /// If true, `open` returns `PermissionDenied`.
        pub fail_open: Arc<AtomicBool>,
        /// If true, every write returns an error.
        pub fail_write: Arc<AtomicBool>,
        /// If true, every write accepts one byte less than offered.
        pub short_write: Arc<AtomicBool>,
    }

    impl Default for MockControl {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockControl {
        pub fn new() -> Self {
            MockControl {
                path: PathBuf::from("mock://leds/ACT/brightness"),
                writes: Arc::new(Mutex::new(Vec::new())),
                opens: Arc::new(AtomicUsize::new(0)),
                live_handles: Arc::new(AtomicUsize::new(0)),
                fail_open: Arc::new(AtomicBool::new(false)),
                fail_write: Arc::new(AtomicBool::new(false)),
                short_write: Arc::new(AtomicBool::new(false)),
            }
        }

        pub fn set_fail_open(&self, fail: bool) {
            self.fail_open.store(fail, Ordering::SeqCst);
        }

        pub fn set_fail_write(&self, fail: bool) {
            self.fail_write.store(fail, Ordering::SeqCst);
        }

        pub fn set_short_write(&self, short: bool) {
            self.short_write.store(short, Ordering::SeqCst);
        }

        pub fn written(&self) -> Vec<Vec<u8>> {
            self.writes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recent write as text, if any.
        pub fn last_written(&self) -> Option<String> {
            self.written()
                .last()
                .map(|w| String::from_utf8_lossy(w).into_owned())
        }

        pub fn open_count(&self) -> usize {
            self.opens.load(Ordering::SeqCst)
        }

        pub fn live_handles(&self) -> usize {
            self.live_handles.load(Ordering::SeqCst)
        }
    }

    pub struct MockHandle {
        control: MockControl,
    }

    impl Write for MockHandle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.control.fail_write.load(Ordering::SeqCst) {
                return Err(io::Error::other("mock: write failure injected"));
            }
            let accepted = if self.control.short_write.load(Ordering::SeqCst) {
                buf.len().saturating_sub(1)
            } else {
                buf.len()
            };
            self.control
                .writes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(buf[..accepted].to_vec());
            Ok(accepted)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for MockHandle {
        fn drop(&mut self) {
            self.control.live_handles.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl ControlFile for MockControl {
        type Handle = MockHandle;

        fn path(&self) -> &Path {
            &self.path
        }

        fn open(&self) -> io::Result<MockHandle> {
            if self.fail_open.load(Ordering::SeqCst) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "mock: open failure injected",
                ));
            }
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.live_handles.fetch_add(1, Ordering::SeqCst);
            Ok(MockHandle {
                control: self.clone(),
            })
        }
    }
}
