//! Error types for the kcn navigation state.

use std::path::PathBuf;
use thiserror::Error;

/// Stack-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack is empty")]
    Empty,

    #[error("stack has less than {required} elements (found {actual})")]
    Insufficient { required: usize, actual: usize },
}

/// Cluster information provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// State file errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("state path not set (initialize with `source <(kcn env --init)`)")]
    NoPath,

    #[error("could not fully write state file {path:?}: wrote {written} of {expected} bytes")]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is not a valid stack: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by navigation state operations and the CLI
#[derive(Debug, Error)]
pub enum StateError {
    #[error("context {0} not found")]
    ContextNotFound(String),

    #[error("namespace {namespace} not found in context {context}")]
    NamespaceNotFound { namespace: String, context: String },

    #[error("no previous selection, try `kcn .`")]
    NoPreviousSelection,

    #[error("no context given, try `kcn .`")]
    NoContextGiven,

    #[error("unexpected argument {0} before a subcommand")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for StateError {
    fn from(err: config::ConfigError) -> Self {
        StateError::Config(err.to_string())
    }
}
