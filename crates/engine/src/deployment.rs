//! Deployment context
//!
//! Everything an operation needs, passed explicitly: the provider, the
//! resolver and runner built on top of it, the target stage/region, and the
//! per-project settings. Nothing is read from global state.

use crate::naming::StackNaming;
use crate::resolver::OutputResolver;
use crate::runner::CommandRunner;
use stackrun_config::Config;
use stackrun_core::{CommandExecutor, InvocationContext, StackProvider};
use std::path::PathBuf;

/// Per-project operation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Local directory uploaded by sync
    pub local_path: PathBuf,
    /// Pass `--delete` to `s3 sync`
    pub delete: bool,
    /// Extra `s3 sync` arguments
    pub extra_args: Vec<String>,
    /// Output key holding the bucket name
    pub bucket_output: String,
    /// Output key holding the distribution domain
    pub domain_output: String,
    /// Paths passed to `create-invalidation`
    pub invalidation_paths: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            local_path: config.sync.local_path.clone(),
            delete: config.sync.delete,
            extra_args: config.sync.extra_args.clone(),
            bucket_output: config.outputs.bucket.clone(),
            domain_output: config.outputs.domain.clone(),
            invalidation_paths: config.invalidation.paths.clone(),
        }
    }
}

/// One target environment with its collaborators
pub struct Deployment<'a> {
    provider: &'a dyn StackProvider,
    resolver: OutputResolver<'a>,
    runner: CommandRunner<'a>,
    stage: String,
    region: String,
    settings: Settings,
}

impl<'a> Deployment<'a> {
    /// Assemble a deployment from its parts
    pub fn new(
        provider: &'a dyn StackProvider,
        executor: &'a dyn CommandExecutor,
        naming: StackNaming,
        program: impl Into<String>,
        target: Target,
        settings: Settings,
    ) -> Self {
        let region = Some(target.region.clone()).filter(|region| !region.is_empty());
        let context = InvocationContext::new(region, target.profile);
        Self {
            provider,
            resolver: OutputResolver::new(provider, naming),
            runner: CommandRunner::new(executor, program, context),
            stage: target.stage,
            region: target.region,
            settings,
        }
    }

    /// Assemble a deployment from a loaded configuration
    pub fn from_config(
        config: &Config,
        provider: &'a dyn StackProvider,
        executor: &'a dyn CommandExecutor,
    ) -> Self {
        Self::new(
            provider,
            executor,
            StackNaming::from_config(config),
            config.aws.program.clone(),
            Target {
                stage: config.deploy.stage.clone(),
                region: config.deploy.region.clone(),
                profile: config.deploy.profile.clone(),
            },
            Settings::from(config),
        )
    }

    /// Provider used for queries
    pub fn provider(&self) -> &dyn StackProvider {
        self.provider
    }

    /// Output resolver bound to this deployment's provider
    pub fn resolver(&self) -> &OutputResolver<'a> {
        &self.resolver
    }

    /// Command runner bound to this deployment's region/profile
    pub fn runner(&self) -> &CommandRunner<'a> {
        &self.runner
    }

    /// Target stage
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Target region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Stack name for the target stage
    pub fn stack_name(&self) -> String {
        self.resolver.stack_name(&self.stage)
    }

    /// Operation settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve an output of this deployment's stack
    pub fn resolve(&self, output_key: &str) -> crate::Result<Option<String>> {
        self.resolver.resolve(output_key, &self.stage, &self.region)
    }
}

/// Stage, region and credential profile of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Deployment stage
    pub stage: String,
    /// Region
    pub region: String,
    /// Credential profile
    pub profile: Option<String>,
}
