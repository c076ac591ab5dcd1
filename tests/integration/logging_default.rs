//! Integration tests for logging destinations.
//!
//! Stdout carries shell code, so logs must stay off it unless asked for.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn kcn(temp_dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_kcn"));
    command
        .env_remove("KCN_STATE_PATH")
        .env_remove("KCN_LOG")
        .env_remove("KCN_LOG_OUTPUT")
        .env_remove("KCN_LOG_FORMAT")
        .env("HOME", temp_dir.path().join("home"))
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env("XDG_CACHE_HOME", temp_dir.path().join("cache"))
        .env("XDG_STATE_HOME", temp_dir.path().join("state"));
    command
}

fn empty_state(temp_dir: &TempDir) -> std::path::PathBuf {
    let path = temp_dir.path().join("kcn-1-log000");
    fs::write(&path, "[]").unwrap();
    path
}

#[test]
fn test_default_logging_is_quiet() {
    let temp_dir = TempDir::new().unwrap();
    let state = empty_state(&temp_dir);

    let output = kcn(&temp_dir)
        .arg("--state-path")
        .arg(&state)
        .arg("env")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "KCN_CONTEXT=\nKCN_NAMESPACE=\n"
    );
    assert!(
        output.stderr.is_empty(),
        "default level should not log on success: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_verbose_logging_goes_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let state = empty_state(&temp_dir);

    let output = kcn(&temp_dir)
        .arg("--state-path")
        .arg(&state)
        .arg("--verbose")
        .arg("env")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "KCN_CONTEXT=\nKCN_NAMESPACE=\n"
    );
    assert!(!output.stderr.is_empty(), "verbose mode should emit logs to stderr");
}

#[test]
fn test_file_logging() {
    let temp_dir = TempDir::new().unwrap();
    let state = empty_state(&temp_dir);
    let log_file = temp_dir.path().join("logs").join("kcn.log");

    let output = kcn(&temp_dir)
        .arg("--state-path")
        .arg(&state)
        .args(["--log-level", "debug", "--log-output", "file", "--log-file"])
        .arg(&log_file)
        .arg("list")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let content = fs::read_to_string(&log_file).unwrap();
    assert!(content.contains("Read state file"), "got: {}", content);
}
