//! Command runner abstraction used by the kubectl provider.

use crate::error::ProviderError;
use std::process::Command;
use tracing::debug;

/// Executes an external program and returns its stdout.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ProviderError>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ProviderError> {
        debug!(program, ?args, "Running provider command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ProviderError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProviderError::CommandFailed {
                command: format!("{} {}", program, args.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
