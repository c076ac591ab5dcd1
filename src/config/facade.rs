//! Config loading facade: merges defaults with file sources and deserializes.

use super::merge::merge_policy;
use super::sources::global_file;
use super::KcnConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};

/// Entry point for loading [`KcnConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults plus the global config file, if present.
    pub fn load() -> Result<KcnConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load defaults plus an explicit config file (which must exist).
    pub fn load_from_file(path: &Path) -> Result<KcnConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Explicit file when given, otherwise the layered default load.
    pub fn load_with_override(path: Option<&Path>) -> Result<KcnConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Location of the global config file on this platform.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
