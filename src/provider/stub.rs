//! In-memory provider with fixed fixtures, for tests and demos.

use super::{ClusterInfoProvider, DEFAULT_NAMESPACE};
use crate::error::ProviderError;
use std::cell::Cell;
use std::collections::HashMap;

/// Provider serving fixed context/namespace fixtures.
///
/// Each call kind can be made to fail, and calls are counted so tests can
/// assert which lookups a resolution performed.
#[derive(Debug, Default)]
pub struct StubProvider {
    contexts: Vec<String>,
    current_context: String,
    namespaces: HashMap<String, Vec<String>>,
    fail_contexts: bool,
    fail_current_context: bool,
    fail_namespaces: bool,
    contexts_calls: Cell<usize>,
    current_context_calls: Cell<usize>,
    namespaces_calls: Cell<usize>,
}

impl StubProvider {
    pub fn new<I, S>(contexts: I, current_context: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contexts: contexts.into_iter().map(Into::into).collect(),
            current_context: current_context.into(),
            ..Self::default()
        }
    }

    /// Three contexts with five namespaces each; `bravo-stage` is current.
    pub fn fixture() -> Self {
        Self::new(["alpha-dev", "bravo-stage", "delta-prod"], "bravo-stage")
            .with_namespaces(
                "alpha-dev",
                ["app-a", "app-b", "app-c", DEFAULT_NAMESPACE, "kube-system"],
            )
            .with_namespaces(
                "bravo-stage",
                ["app-d", "app-e", "app-f", DEFAULT_NAMESPACE, "kube-system"],
            )
            .with_namespaces(
                "delta-prod",
                ["app-x", "app-y", "app-z", DEFAULT_NAMESPACE, "kube-system"],
            )
    }

    pub fn with_namespaces<I, S>(mut self, context: impl Into<String>, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces.insert(
            context.into(),
            namespaces.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn failing_contexts(mut self) -> Self {
        self.fail_contexts = true;
        self
    }

    pub fn failing_current_context(mut self) -> Self {
        self.fail_current_context = true;
        self
    }

    pub fn failing_namespaces(mut self) -> Self {
        self.fail_namespaces = true;
        self
    }

    pub fn contexts_calls(&self) -> usize {
        self.contexts_calls.get()
    }

    pub fn current_context_calls(&self) -> usize {
        self.current_context_calls.get()
    }

    pub fn namespaces_calls(&self) -> usize {
        self.namespaces_calls.get()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl ClusterInfoProvider for StubProvider {
    fn contexts(&self) -> Result<Vec<String>, ProviderError> {
        bump(&self.contexts_calls);
        if self.fail_contexts {
            return Err(ProviderError::Unavailable("contexts".to_string()));
        }
        Ok(self.contexts.clone())
    }

    fn current_context(&self) -> Result<String, ProviderError> {
        bump(&self.current_context_calls);
        if self.fail_current_context {
            return Err(ProviderError::Unavailable("current context".to_string()));
        }
        Ok(self.current_context.clone())
    }

    fn namespaces(&self, context: &str) -> Result<Vec<String>, ProviderError> {
        bump(&self.namespaces_calls);
        if self.fail_namespaces {
            return Err(ProviderError::Unavailable(format!(
                "namespaces for {}",
                context
            )));
        }
        Ok(self.namespaces.get(context).cloned().unwrap_or_default())
    }
}
