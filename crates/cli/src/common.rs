//! Common utilities and types shared across CLI commands

use stackrun_aws::AwsCli;
use stackrun_config::Config;
use stackrun_core::CommandExecutor;
use stackrun_engine::{Deployment, StackNaming};
use std::sync::Arc;

/// Runtime context for CLI commands
///
/// Holds the merged configuration (file, env and flags) and the provider
/// built from it. Commands borrow a [`Deployment`] from it per run.
#[derive(Clone)]
pub struct RuntimeContext {
    /// Shared configuration
    pub config: Arc<Config>,
    /// Stack provider configured with the program and profile
    pub provider: AwsCli,
}

impl RuntimeContext {
    /// Create a runtime context from a fully merged configuration
    pub fn new(config: Config) -> Self {
        let provider = AwsCli::new()
            .with_program(config.aws.program.clone())
            .with_profile(config.deploy.profile.clone());

        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// Stack naming rule of this project
    #[inline]
    pub fn naming(&self) -> StackNaming {
        StackNaming::from_config(&self.config)
    }

    /// Bind a deployment to `executor`
    pub fn deployment<'a>(&'a self, executor: &'a dyn CommandExecutor) -> Deployment<'a> {
        Deployment::from_config(&self.config, &self.provider, executor)
    }
}
