//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global config file (or an
//! explicit `--config` file). Tests included.

use crate::error::StateError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KcnConfig {
    /// State file settings
    #[serde(default)]
    pub state: StateConfig,

    /// Cluster information provider settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// State file settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory for new state files (defaults to the user cache dir)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl StateConfig {
    /// Configured cache dir, else the platform cache dir.
    pub fn resolve_cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(|| {
            directories::BaseDirs::new().map(|dirs| dirs.cache_dir().to_path_buf())
        })
    }
}

/// Cluster information provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// kubectl program name or path
    #[serde(default = "default_kubectl")]
    pub kubectl: String,
}

fn default_kubectl() -> String {
    "kubectl".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kubectl: default_kubectl(),
        }
    }
}

impl KcnConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), StateError> {
        let mut errors = Vec::new();

        if self.provider.kubectl.trim().is_empty() {
            errors.push("provider.kubectl cannot be empty".to_string());
        }
        if let Some(dir) = &self.state.cache_dir {
            if dir.as_os_str().is_empty() {
                errors.push("state.cache_dir cannot be empty".to_string());
            }
        }
        if let Err(e) = self.logging.validate() {
            errors.push(format!("logging: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StateError::Config(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}
