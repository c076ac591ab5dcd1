//! CLI parse: clap types for kcn. No behavior beyond resolving the command.

use crate::error::StateError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kcn - Kubernetes context/namespace navigation
#[derive(Parser)]
#[command(name = "kcn")]
#[command(about = "Switch between Kubernetes context/namespace selections like a directory stack")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Context to select: a name, `.` for the current one, `-` for the previous one
    pub context: Option<String>,

    /// Namespace to select: a name, or `-` for the previous one
    pub namespace: Option<String>,

    /// State file for this shell session
    #[arg(long, env = "KCN_STATE_PATH", global = true)]
    pub state_path: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Select a context and namespace (same as `kcn <context> [namespace]`)
    Switch {
        /// Context name, `.` or `-`
        context: String,
        /// Namespace name or `-`
        namespace: Option<String>,
    },
    /// Print shell assignments for the current selection
    Env {
        /// Print the shell init script (source from your shell rc file)
        #[arg(short, long)]
        init: bool,
    },
    /// Forget every selection in this session
    Clear,
    /// Show the selection history, most recent first
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Cli {
    /// The subcommand, or a switch built from the positional tokens.
    pub fn resolve_command(&self) -> Result<Commands, StateError> {
        if let Some(command) = &self.command {
            if let Some(token) = self.context.as_ref().or(self.namespace.as_ref()) {
                return Err(StateError::UnexpectedArgument(token.clone()));
            }
            return Ok(command.clone());
        }
        match &self.context {
            Some(context) => Ok(Commands::Switch {
                context: context.clone(),
                namespace: self.namespace.clone(),
            }),
            None => Err(StateError::NoContextGiven),
        }
    }

    /// State path from the flag or environment, ignoring empty values.
    pub fn state_path(&self) -> Option<PathBuf> {
        self.state_path
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
    }
}
