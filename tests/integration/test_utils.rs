//! Shared test utilities for integration tests
//!
//! Centralizes XDG directory isolation and state-file setup so each test gets
//! its own config, cache, and state locations.

use kcn::config::{KcnConfig, StateConfig};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
    xdg_cache_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            xdg_cache_home: std::env::var("XDG_CACHE_HOME").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
        restore_var("XDG_CACHE_HOME", self.xdg_cache_home);
    }
}

fn restore_var(name: &str, value: Option<String>) {
    match value {
        Some(orig) => std::env::set_var(name, orig),
        None => std::env::remove_var(name),
    }
}

/// Run `f` with HOME, XDG_CONFIG_HOME and XDG_CACHE_HOME inside `test_dir`.
///
/// Config lands in `<test_dir>/config`, cache in `<test_dir>/cache`. The
/// original environment is restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_cache_home = test_dir.path().join("cache");
    let test_home = test_dir.path().join("home");

    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_cache_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    std::env::set_var("XDG_CACHE_HOME", test_cache_home.to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}

/// Config whose state cache dir lives inside `test_dir`.
pub fn isolated_config(test_dir: &TempDir) -> KcnConfig {
    KcnConfig {
        state: StateConfig {
            cache_dir: Some(test_dir.path().join("cache")),
        },
        ..KcnConfig::default()
    }
}

/// An existing state file holding an empty history.
pub fn empty_state_file(test_dir: &TempDir) -> PathBuf {
    let path = test_dir.path().join("kcn-1-test00");
    std::fs::write(&path, "[]").unwrap();
    path
}
