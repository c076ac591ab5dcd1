//! CLI route: single route table and run context. Dispatches to navigation
//! state, shell formatting, and presentation.

use crate::cli::output::map_error;
use crate::cli::parse::Commands;
use crate::cli::presentation::format_stack;
use crate::config::KcnConfig;
use crate::error::{StateError, StorageError};
use crate::provider::{ClusterInfoProvider, KubectlProvider};
use crate::shell;
use crate::state::{Element, NavigationState, StateLocation, UpdateOutcome};
use std::path::PathBuf;
use tracing::{debug, info};

/// Runtime context for one CLI invocation: configuration, the session's state
/// path, and the cluster information provider.
pub struct RunContext<P = KubectlProvider> {
    config: KcnConfig,
    state_path: Option<PathBuf>,
    provider: P,
}

impl RunContext<KubectlProvider> {
    /// Validate config and build a kubectl-backed context.
    pub fn new(config: KcnConfig, state_path: Option<PathBuf>) -> Result<Self, StateError> {
        let provider = KubectlProvider::new(config.provider.kubectl.clone());
        Self::with_provider(config, state_path, provider)
    }
}

impl<P: ClusterInfoProvider> RunContext<P> {
    pub fn with_provider(
        config: KcnConfig,
        state_path: Option<PathBuf>,
        provider: P,
    ) -> Result<Self, StateError> {
        config.validate()?;
        Ok(Self {
            config,
            state_path,
            provider,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn location(&self) -> StateLocation {
        StateLocation {
            path: self.state_path.clone(),
            cache_dir: self.config.state.resolve_cache_dir(),
        }
    }

    fn open_state(&self) -> Result<NavigationState<'_>, StateError> {
        NavigationState::open(&self.provider, self.location())
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, StateError> {
        match command {
            Commands::Switch { context, namespace } => {
                let mut state = self.open_state()?;
                let outcome = state.update(context, namespace.as_deref().unwrap_or(""))?;
                let current = outcome.current();
                match &outcome {
                    UpdateOutcome::Pushed(_) => info!(
                        context = %current.context,
                        namespace = %current.namespace,
                        "Switched selection"
                    ),
                    UpdateOutcome::Swapped(_) => info!(
                        context = %current.context,
                        namespace = %current.namespace,
                        "Returned to previous selection"
                    ),
                }
                Ok(String::new())
            }
            Commands::Env { init: false } => Ok(shell::env_assignments(&self.current()?)),
            Commands::Env { init: true } => {
                let (path, fresh) = match self.open_state() {
                    Ok(state) => {
                        let path = state
                            .path()
                            .map(|p| p.to_path_buf())
                            .ok_or(StorageError::NoPath)?;
                        (path, false)
                    }
                    Err(e) => {
                        debug!(error = %e, "No readable state, starting a new session");
                        let mut state = NavigationState::new(
                            &self.provider,
                            StateLocation {
                                path: None,
                                cache_dir: self.config.state.resolve_cache_dir(),
                            },
                        );
                        let path = state.write()?.to_path_buf();
                        info!(path = %path.display(), "Created state file");
                        (path, true)
                    }
                };
                Ok(shell::init_script(&path, fresh))
            }
            Commands::Clear => {
                match self.open_state() {
                    Ok(mut state) => state.clear()?,
                    Err(e) => {
                        debug!(error = %e, "Nothing to clear");
                        eprintln!("{}", map_error(&e));
                    }
                }
                Ok(String::new())
            }
            Commands::List { format } => {
                let state = self.open_state()?;
                format_stack(state.stack(), format)
            }
        }
    }

    /// Current selection for this session, or an empty element.
    pub fn current(&self) -> Result<Element, StateError> {
        let state = self.open_state()?;
        Ok(state.current().cloned().unwrap_or_default())
    }
}
