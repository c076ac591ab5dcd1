//! kcn: Kubernetes context/namespace navigation
//!
//! Keeps a per-shell-session history of (context, namespace) selections and
//! switches between them the way `pushd`/`cd -` switch directories.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider;
pub mod shell;
pub mod state;
