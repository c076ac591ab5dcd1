//! kubectl-backed provider

use super::runner::{CommandRunner, ProcessRunner};
use super::ClusterInfoProvider;
use crate::error::ProviderError;

const NAMESPACE_TEMPLATE: &str = "--template={{range .items}}{{.metadata.name}} {{end}}";

/// Lists contexts and namespaces by invoking the kubectl CLI.
pub struct KubectlProvider<R = ProcessRunner> {
    program: String,
    runner: R,
}

impl KubectlProvider<ProcessRunner> {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, ProcessRunner)
    }
}

impl<R: CommandRunner> KubectlProvider<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

impl<R: CommandRunner> ClusterInfoProvider for KubectlProvider<R> {
    fn contexts(&self) -> Result<Vec<String>, ProviderError> {
        let out = self
            .runner
            .run(&self.program, &["config", "get-contexts", "-o", "name"])?;
        Ok(out.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
    }

    fn current_context(&self) -> Result<String, ProviderError> {
        let out = self.runner.run(&self.program, &["config", "current-context"])?;
        Ok(out.trim().to_string())
    }

    fn namespaces(&self, context: &str) -> Result<Vec<String>, ProviderError> {
        let out = self.runner.run(
            &self.program,
            &[
                "--context",
                context,
                "get",
                "namespaces",
                "-o",
                "template",
                NAMESPACE_TEMPLATE,
            ],
        )?;
        Ok(out.split_whitespace().map(String::from).collect())
    }
}
