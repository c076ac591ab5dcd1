//! CLI output: error mapping from domain errors to the CLI surface.

use crate::error::StateError;

/// Map domain errors to the line printed on stderr.
pub fn map_error(e: &StateError) -> String {
    format!("kcn: {}", e)
}
