//! Integration tests for the `rpilightd` and `rpilight-cli` binaries.
//!
//! The daemon is pointed at a temp-file brightness entry and a temp socket
//! directory via `--config`, so no real LED or system paths are touched.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cli() -> assert_cmd::Command {
    cargo_bin_cmd!("rpilight-cli")
}

fn daemon() -> assert_cmd::Command {
    cargo_bin_cmd!("rpilightd")
}

/// Temp workspace: config file, fake brightness entry, socket dir.
struct Sandbox {
    _dir: tempfile::TempDir,
    config: PathBuf,
    led: PathBuf,
    sockets: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let led = dir.path().join("brightness");
        let sockets = dir.path().join("sockets");
        std::fs::write(&led, "").unwrap();
        let config = dir.path().join("config.toml");
        Self::write_config(&config, &led, &sockets, 2);
        Sandbox {
            _dir: dir,
            config,
            led,
            sockets,
        }
    }

    fn write_config(config: &Path, led: &Path, sockets: &Path, max_threads: usize) {
        std::fs::write(
            config,
            format!(
                "led_path = \"{}\"\nsocket_dir = \"{}\"\nmax_threads = {max_threads}\n",
                led.display(),
                sockets.display()
            ),
        )
        .unwrap();
    }

    fn socket(&self) -> PathBuf {
        self.sockets
            .join("android.hardware.rpilight.IRpilight@default.sock")
    }

    fn config_arg(&self) -> &str {
        self.config.to_str().unwrap()
    }

    /// Reset the brightness entry so the next write is observed in isolation.
    fn clear_led(&self) {
        std::fs::write(&self.led, "").unwrap();
    }

    fn led_contents(&self) -> String {
        std::fs::read_to_string(&self.led).unwrap()
    }
}

/// Running daemon, killed on drop.
struct Daemon(Child);

#[cfg(unix)]
impl Daemon {
    /// Send SIGTERM and wait for the process to exit.
    fn terminate(&mut self) -> std::process::ExitStatus {
        let status = Command::new("kill")
            .args(["-TERM", &self.0.id().to_string()])
            .status()
            .unwrap();
        assert!(status.success(), "kill -TERM failed");
        self.0.wait().unwrap()
    }
}

impl Daemon {
    fn start(sandbox: &Sandbox) -> Self {
        let child = Command::new(env!("CARGO_BIN_EXE_rpilightd"))
            .args(["--config", sandbox.config_arg()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        let daemon = Daemon(child);
        let deadline = Instant::now() + Duration::from_secs(10);
        while !sandbox.socket().exists() {
            assert!(Instant::now() < deadline, "daemon did not register in time");
            std::thread::sleep(Duration::from_millis(20));
        }
        daemon
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

// ── Help / version ──

#[test]
fn cli_help_succeeds() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rpilight-cli"));
}

#[test]
fn cli_version_prints_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn daemon_help_succeeds() {
    daemon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rpilightd"));
}

#[test]
fn cli_set_help_mentions_state() {
    cli()
        .args(["set", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STATE"));
}

// ── config ──

#[test]
fn cli_config_json_produces_valid_json() {
    let sandbox = Sandbox::new();
    let output = cli()
        .args(["--json", "--config", sandbox.config_arg(), "config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("config --json should produce valid JSON");
    assert_eq!(json["config_file_exists"], true);
    assert_eq!(json["settings"]["max_threads"], 2);
    assert_eq!(
        json["service"]["instance"],
        "android.hardware.rpilight.IRpilight/default"
    );
    assert_eq!(json["service"]["socket_exists"], false);
}

#[test]
fn cli_verbose_flag_accepted() {
    let sandbox = Sandbox::new();
    cli()
        .args(["-v", "--config", sandbox.config_arg(), "config"])
        .assert()
        .success();
}

// ── LED control without a service ──

#[test]
fn cli_on_without_service_fails() {
    let sandbox = Sandbox::new();
    cli()
        .args(["--config", sandbox.config_arg(), "--wait", "0", "on"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
    assert_eq!(sandbox.led_contents(), "");
}

// ── Daemon + CLI end to end ──

#[test]
fn on_off_and_negative_states_reach_the_led() {
    let sandbox = Sandbox::new();
    let _daemon = Daemon::start(&sandbox);

    cli()
        .args(["--config", sandbox.config_arg(), "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LED control result: success"));
    assert_eq!(sandbox.led_contents(), "255");

    sandbox.clear_led();
    cli()
        .args(["--config", sandbox.config_arg(), "off"])
        .assert()
        .success();
    assert_eq!(sandbox.led_contents(), "0");

    sandbox.clear_led();
    cli()
        .args(["--config", sandbox.config_arg(), "set", "-5"])
        .assert()
        .success();
    assert_eq!(sandbox.led_contents(), "0");

    sandbox.clear_led();
    cli()
        .args(["--config", sandbox.config_arg(), "set", "2147483647"])
        .assert()
        .success();
    assert_eq!(sandbox.led_contents(), "255");
}

#[test]
fn json_output_reports_state_and_success() {
    let sandbox = Sandbox::new();
    let _daemon = Daemon::start(&sandbox);

    let output = cli()
        .args(["--json", "--config", sandbox.config_arg(), "set", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json, serde_json::json!({"state": 1, "success": true}));
}

#[test]
fn missing_led_entry_is_reported_as_service_error() {
    let sandbox = Sandbox::new();
    let _daemon = Daemon::start(&sandbox);
    std::fs::remove_file(&sandbox.led).unwrap();

    cli()
        .args(["--config", sandbox.config_arg(), "on"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Service-specific error -1"));
    assert!(!sandbox.led.exists(), "service must not create the entry");
}

// ── Daemon startup failures ──

#[cfg(unix)]
#[test]
fn daemon_exits_minus_one_when_socket_dir_is_unusable() {
    let sandbox = Sandbox::new();
    // A regular file where the socket directory should be.
    std::fs::write(&sandbox.sockets, "").unwrap();
    daemon()
        .args(["--config", sandbox.config_arg()])
        .assert()
        .code(255);
}

#[cfg(unix)]
#[test]
fn daemon_exits_minus_one_on_invalid_config() {
    let sandbox = Sandbox::new();
    Sandbox::write_config(&sandbox.config, &sandbox.led, &sandbox.sockets, 0);
    daemon()
        .args(["--config", sandbox.config_arg()])
        .assert()
        .code(255)
        .stdout(predicate::str::contains(format!(
            "Invalid configuration in {}",
            sandbox.config.display()
        )))
        .stdout(predicate::str::contains("max_threads"));
    assert!(!sandbox.socket().exists());
}

#[cfg(unix)]
#[test]
fn second_daemon_fails_to_register() {
    let sandbox = Sandbox::new();
    let _first = Daemon::start(&sandbox);
    daemon()
        .args(["--config", sandbox.config_arg()])
        .assert()
        .code(255)
        .stdout(predicate::str::contains("Failed to register Rpilight service"));
}

#[test]
fn padded_led_path_in_config_still_reaches_the_led() {
    let sandbox = Sandbox::new();
    std::fs::write(
        &sandbox.config,
        format!(
            "led_path = \"  {}  \"\nsocket_dir = \"{}\"\n",
            sandbox.led.display(),
            sandbox.sockets.display()
        ),
    )
    .unwrap();
    let _daemon = Daemon::start(&sandbox);

    cli()
        .args(["--config", sandbox.config_arg(), "on"])
        .assert()
        .success();
    assert_eq!(sandbox.led_contents(), "255");
}

// ── Signals ──

#[cfg(unix)]
#[test]
fn sigterm_removes_socket_and_exits_130() {
    let sandbox = Sandbox::new();
    let mut daemon = Daemon::start(&sandbox);

    // A served call means the signal handler is installed.
    cli()
        .args(["--config", sandbox.config_arg(), "off"])
        .assert()
        .success();

    let status = daemon.terminate();
    assert_eq!(status.code(), Some(130));
    assert!(!sandbox.socket().exists(), "socket left behind after SIGTERM");
}
