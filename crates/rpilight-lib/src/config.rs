//! Service configuration — TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ipc::DEFAULT_MAX_THREADS;
use crate::led::LED_FILE_PATH;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str = "# rpilight configuration\n\n";

/// Upper bound accepted for `max_threads`.
pub const MAX_THREADS_LIMIT: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LED brightness control file. Default: the activity LED.
    #[serde(default = "default_led_path")]
    pub led_path: String,

    /// Directory holding the service sockets. Empty = platform runtime dir.
    #[serde(default)]
    pub socket_dir: String,

    /// Worker threads servicing incoming calls. Default: 2.
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,
}

fn default_led_path() -> String {
    LED_FILE_PATH.into()
}

fn default_max_threads() -> usize {
    DEFAULT_MAX_THREADS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            led_path: default_led_path(),
            socket_dir: String::new(),
            max_threads: default_max_threads(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `led_path` is empty or not absolute.
    InvalidLedPath(String),
    /// `max_threads` is outside `1..=MAX_THREADS_LIMIT`.
    InvalidMaxThreads(usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidLedPath(e) => write!(f, "Invalid led_path: {e}"),
            ValidationError::InvalidMaxThreads(n) => write!(
                f,
                "Invalid max_threads: {n} (must be between 1 and {MAX_THREADS_LIMIT})"
            ),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rpilight"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Default socket directory: `$XDG_RUNTIME_DIR/rpilight`, else the temp dir.
    pub fn default_socket_dir() -> PathBuf {
        dirs::runtime_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("rpilight")
    }

    /// Effective LED control file, with surrounding whitespace removed.
    pub fn led_path(&self) -> PathBuf {
        PathBuf::from(self.led_path.trim())
    }

    /// Effective socket directory.
    pub fn socket_dir(&self) -> PathBuf {
        let dir = self.socket_dir.trim();
        if dir.is_empty() {
            Self::default_socket_dir()
        } else {
            PathBuf::from(dir)
        }
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let led_path = self.led_path();
        if led_path.as_os_str().is_empty() {
            errors.push(ValidationError::InvalidLedPath("path is empty".into()));
        } else if !led_path.is_absolute() {
            errors.push(ValidationError::InvalidLedPath(format!(
                "{} is not an absolute path",
                led_path.display()
            )));
        }

        if !(1..=MAX_THREADS_LIMIT).contains(&self.max_threads) {
            errors.push(ValidationError::InvalidMaxThreads(self.max_threads));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
