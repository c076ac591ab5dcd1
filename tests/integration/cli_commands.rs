//! End-to-end tests for the kcn binary against a scripted kubectl.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FAKE_KUBECTL: &str = r#"#!/bin/sh
case "$*" in
  "config get-contexts -o name") printf 'alpha-dev\nbravo-stage\n' ;;
  "config current-context") echo bravo-stage ;;
  "--context alpha-dev get namespaces"*) echo "app-a default kube-system" ;;
  "--context bravo-stage get namespaces"*) echo "app-e default" ;;
  *) echo "unexpected arguments: $*" >&2; exit 1 ;;
esac
"#;

/// Temp home with a fake kubectl and a config file pointing at it.
struct Session {
    dir: TempDir,
    config: PathBuf,
}

impl Session {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let kubectl = dir.path().join("kubectl");
        fs::write(&kubectl, FAKE_KUBECTL).unwrap();
        fs::set_permissions(&kubectl, fs::Permissions::from_mode(0o755)).unwrap();

        let config = dir.path().join("kcn.toml");
        fs::write(
            &config,
            format!(
                "[provider]\nkubectl = {:?}\n\n[state]\ncache_dir = {:?}\n",
                kubectl.to_string_lossy(),
                dir.path().join("cache").to_string_lossy()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn run(&self, state_path: Option<&Path>, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_kcn"));
        command
            .env_remove("KCN_STATE_PATH")
            .env_remove("KCN_LOG")
            .env_remove("KCN_LOG_OUTPUT")
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .arg("--config")
            .arg(&self.config);
        if let Some(path) = state_path {
            command.arg("--state-path").arg(path);
        }
        command.args(args).output().unwrap()
    }

    /// Run `kcn env --init` and return the state path it exported.
    fn init(&self) -> PathBuf {
        let output = self.run(None, &["env", "--init"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let stdout = stdout(&output);
        let line = stdout
            .lines()
            .find(|l| l.starts_with("export KCN_STATE_PATH="))
            .unwrap();
        PathBuf::from(line.trim_start_matches("export KCN_STATE_PATH="))
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_env_init_creates_session_state() {
    let session = Session::new();
    let output = session.run(None, &["env", "--init"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("export KCN_CONTEXT= KCN_NAMESPACE=\n"));
    assert!(out.contains("kcn() {"));

    let state = session.init();
    assert!(state.starts_with(session.dir.path().join("cache")));
    assert_eq!(fs::read_to_string(state).unwrap(), "[]");
}

#[test]
fn test_switch_and_env() {
    let session = Session::new();
    let state = session.init();

    let output = session.run(Some(&state), &["alpha-dev", "app-a"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let output = session.run(Some(&state), &["env"]);
    assert_eq!(
        stdout(&output),
        "KCN_CONTEXT=alpha-dev\nKCN_NAMESPACE=app-a\n"
    );
}

#[test]
fn test_current_then_previous() {
    let session = Session::new();
    let state = session.init();

    assert!(session.run(Some(&state), &["."]).status.success());
    assert!(session.run(Some(&state), &["alpha-dev", "kube-system"]).status.success());
    assert!(session.run(Some(&state), &["-"]).status.success());

    let output = session.run(Some(&state), &["env"]);
    assert_eq!(
        stdout(&output),
        "KCN_CONTEXT=bravo-stage\nKCN_NAMESPACE=default\n"
    );

    let output = session.run(Some(&state), &["list", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["namespace"], "kube-system");
}

#[test]
fn test_unknown_context_fails() {
    let session = Session::new();
    let state = session.init();

    let output = session.run(Some(&state), &["zulu-prod"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("kcn: context zulu-prod not found"));
    assert_eq!(fs::read_to_string(state).unwrap(), "[]");
}

#[test]
fn test_unknown_namespace_fails() {
    let session = Session::new();
    let state = session.init();

    let output = session.run(Some(&state), &["bravo-stage", "app-a"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("namespace app-a not found in context bravo-stage"));
}

#[test]
fn test_no_context_given() {
    let session = Session::new();
    let output = session.run(None, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("kcn: "));
}

#[test]
fn test_switch_without_init_fails() {
    let session = Session::new();
    let output = session.run(None, &["alpha-dev"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("state path not set"));
}

#[test]
fn test_clear_on_missing_state_succeeds() {
    let session = Session::new();
    let missing = session.dir.path().join("kcn-0-gone00");

    let output = session.run(Some(&missing), &["clear"]);
    assert!(output.status.success());
    assert!(stderr(&output).starts_with("kcn: "));
    assert!(!missing.exists());
}

#[test]
fn test_clear_resets_history() {
    let session = Session::new();
    let state = session.init();
    assert!(session.run(Some(&state), &["alpha-dev"]).status.success());

    let output = session.run(Some(&state), &["clear"]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&state).unwrap(), "[]");

    let output = session.run(Some(&state), &["env"]);
    assert_eq!(stdout(&output), "KCN_CONTEXT=\nKCN_NAMESPACE=\n");
}
