//! Cluster Information Provider
//!
//! Source of valid context names, the ambient current context, and the
//! namespaces of each context. Navigation state consults a provider through
//! the [`ClusterInfoProvider`] trait; the production implementation shells out
//! to `kubectl`, and [`stub::StubProvider`] serves fixed fixtures for tests.

use crate::error::ProviderError;

pub mod kubectl;
pub mod runner;
pub mod stub;

pub use kubectl::KubectlProvider;
pub use runner::{CommandRunner, ProcessRunner};
pub use stub::StubProvider;

/// Namespace used whenever resolution has no better answer.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Cluster information source
///
/// Lists carry no ordering guarantee; callers only test membership.
pub trait ClusterInfoProvider {
    /// Names of all known contexts
    fn contexts(&self) -> Result<Vec<String>, ProviderError>;

    /// The context currently selected outside of kcn
    fn current_context(&self) -> Result<String, ProviderError>;

    /// Namespaces that exist in `context`
    fn namespaces(&self, context: &str) -> Result<Vec<String>, ProviderError>;
}
