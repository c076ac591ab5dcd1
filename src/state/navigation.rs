//! Navigation state and token resolution
//!
//! A [`NavigationState`] is rebuilt from its state file on every invocation,
//! performs at most one transition, and writes the resulting stack back.

use super::persistence;
use super::stack::{Element, Stack};
use crate::error::{StateError, StorageError};
use crate::provider::{ClusterInfoProvider, DEFAULT_NAMESPACE};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Token that reaffirms the current selection.
pub const CURRENT_TOKEN: &str = ".";

/// Token that refers to the previous selection.
pub const PREVIOUS_TOKEN: &str = "-";

/// Where a navigation state lives on disk.
#[derive(Debug, Clone, Default)]
pub struct StateLocation {
    /// Existing state file, if the session already has one
    pub path: Option<PathBuf>,
    /// Directory used to allocate a new state file on first write
    pub cache_dir: Option<PathBuf>,
}

/// Result of a successful [`NavigationState::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A new selection was pushed; carries the new top.
    Pushed(Element),
    /// The top two selections were exchanged; carries the new top.
    Swapped(Element),
}

impl UpdateOutcome {
    pub fn current(&self) -> &Element {
        match self {
            UpdateOutcome::Pushed(e) | UpdateOutcome::Swapped(e) => e,
        }
    }
}

/// Selection history bound to a state file and a cluster information provider.
pub struct NavigationState<'p> {
    stack: Stack,
    path: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    provider: &'p dyn ClusterInfoProvider,
}

impl<'p> NavigationState<'p> {
    /// Empty state; nothing is read until [`read`](Self::read).
    pub fn new(provider: &'p dyn ClusterInfoProvider, location: StateLocation) -> Self {
        Self {
            stack: Stack::new(),
            path: location.path,
            cache_dir: location.cache_dir,
            provider,
        }
    }

    /// Construct and populate from the state file.
    pub fn open(
        provider: &'p dyn ClusterInfoProvider,
        location: StateLocation,
    ) -> Result<Self, StateError> {
        let mut state = Self::new(provider, location);
        state.read()?;
        Ok(state)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Current selection, if any.
    pub fn current(&self) -> Option<&Element> {
        self.stack.peek().ok()
    }

    /// Replace the in-memory stack with the state file's content.
    pub fn read(&mut self) -> Result<(), StateError> {
        let path = self.path.as_deref().ok_or(StorageError::NoPath)?;
        self.stack = persistence::read_stack(path)?;
        Ok(())
    }

    /// Persist the stack, allocating a state path on first use.
    pub fn write(&mut self) -> Result<&Path, StateError> {
        let path = match self.path.take() {
            Some(path) => path,
            None => {
                let cache_dir = self.cache_dir.as_deref().ok_or(StorageError::NoPath)?;
                let path = persistence::allocate_path(cache_dir);
                debug!(path = %path.display(), "Allocated state path");
                path
            }
        };
        let path: &Path = self.path.insert(path);
        persistence::write_stack(path, &self.stack)?;
        Ok(path)
    }

    /// Forget all selections and persist the empty stack.
    pub fn clear(&mut self) -> Result<(), StateError> {
        self.stack.clear();
        self.write()?;
        Ok(())
    }

    /// Resolve a context token and a namespace token (possibly empty) into a
    /// new selection and persist it.
    ///
    /// `-` with an empty namespace token only exchanges the top two
    /// selections. Failures leave both the stack and the state file untouched.
    pub fn update(
        &mut self,
        context_token: &str,
        namespace_token: &str,
    ) -> Result<UpdateOutcome, StateError> {
        debug!(context_token, namespace_token, "Resolving selection");
        let was_empty = self.stack.is_empty();

        let context = match context_token {
            CURRENT_TOKEN => match self.stack.peek() {
                Ok(top) => top.context.clone(),
                Err(_) => self.provider.current_context()?,
            },
            PREVIOUS_TOKEN => {
                if was_empty {
                    return Err(StateError::NoPreviousSelection);
                }
                if namespace_token.is_empty() {
                    return self.pivot();
                }
                self.stack.peek()?.context.clone()
            }
            literal => {
                let contexts = self.provider.contexts()?;
                if !contexts.iter().any(|c| c == literal) {
                    return Err(StateError::ContextNotFound(literal.to_string()));
                }
                literal.to_string()
            }
        };

        let namespace = self.resolve_namespace(&context, namespace_token, was_empty)?;
        let next = Element::new(context, namespace);

        self.stack.push(next.clone());
        if let Err(e) = self.write().map(|_| ()) {
            let _ = self.stack.pop();
            return Err(e);
        }

        debug!(context = %next.context, namespace = %next.namespace, "Selection pushed");
        Ok(UpdateOutcome::Pushed(next))
    }

    fn pivot(&mut self) -> Result<UpdateOutcome, StateError> {
        self.stack.swap()?;
        if let Err(e) = self.write().map(|_| ()) {
            let _ = self.stack.swap();
            return Err(e);
        }
        let top = self.stack.peek()?.clone();
        debug!(context = %top.context, namespace = %top.namespace, "Swapped to previous selection");
        Ok(UpdateOutcome::Swapped(top))
    }

    fn resolve_namespace(
        &self,
        context: &str,
        token: &str,
        was_empty: bool,
    ) -> Result<String, StateError> {
        let available = match self.provider.namespaces(context) {
            Ok(list) => list,
            Err(e) => {
                warn!(
                    context,
                    error = %e,
                    "Could not get namespace list for context {}, falling back to {}",
                    context,
                    DEFAULT_NAMESPACE
                );
                return Ok(DEFAULT_NAMESPACE.to_string());
            }
        };

        let wanted = match token {
            "" => return Ok(DEFAULT_NAMESPACE.to_string()),
            PREVIOUS_TOKEN if was_empty => return Ok(DEFAULT_NAMESPACE.to_string()),
            PREVIOUS_TOKEN => self.stack.peek_second()?.namespace.as_str(),
            literal => literal,
        };

        if available.iter().any(|n| n == wanted) {
            Ok(wanted.to_string())
        } else {
            Err(StateError::NamespaceNotFound {
                namespace: wanted.to_string(),
                context: context.to_string(),
            })
        }
    }
}
