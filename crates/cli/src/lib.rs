//! stackrun CLI library
//!
//! This library contains all the CLI logic for stackrun, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stackrun_config::Config;
use stackrun_engine::Outcome;
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// stackrun - deployment-output-driven commands for static web apps
#[derive(Parser)]
#[command(name = "stackrun")]
#[command(about = "Run deployment commands against a deployed stack's outputs")]
#[command(version)]
#[command(long_about = "Run deployment commands against a deployed stack's outputs

Each command looks up an output of the deployed CloudFormation stack
(<service>-<stage>), builds an aws CLI invocation from it and runs it.

Examples:
  • stackrun syncToS3 --stage prod
      → Upload app/ to the prod stack's bucket

  • stackrun publish --stage prod --profile deploy
      → Sync, then invalidate the CloudFront cache")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, env = "STACKRUN_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Deployment stage
    #[arg(short, long, env = "STACKRUN_STAGE", global = true)]
    pub stage: Option<String>,

    /// Target region
    #[arg(short, long, env = "STACKRUN_REGION", global = true)]
    pub region: Option<String>,

    /// Credential profile passed to the aws CLI
    #[arg(long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "STACKRUN_LOG_FILE", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for stackrun CLI
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Upload the local app directory to the stack's S3 bucket
    #[command(name = "syncToS3")]
    SyncToS3,

    /// Delete every object in the stack's S3 bucket
    #[command(name = "emptyBucket")]
    EmptyBucket,

    /// Print the stack's S3 bucket name
    #[command(name = "bucketInfo")]
    BucketInfo,

    /// Print the stack's CloudFront domain
    #[command(name = "domainInfo")]
    DomainInfo,

    /// Invalidate the CloudFront distribution serving the stack's domain
    #[command(name = "invalidateCloudFrontCache")]
    InvalidateCloudFrontCache,

    /// Sync to S3, then invalidate the CloudFront cache
    Publish,

    /// Check the aws CLI and show the resolved deployment target
    Doctor,

    /// List the available operations
    Operations,
}

impl Commands {
    /// Registered operation this command dispatches to, if any
    pub fn operation(self) -> Option<&'static str> {
        match self {
            Self::SyncToS3 => Some("syncToS3"),
            Self::EmptyBucket => Some("emptyBucket"),
            Self::BucketInfo => Some("bucketInfo"),
            Self::DomainInfo => Some("domainInfo"),
            Self::InvalidateCloudFrontCache => Some("invalidateCloudFrontCache"),
            Self::Publish => Some("publish"),
            Self::Doctor | Self::Operations => None,
        }
    }
}

/// Load the configuration and apply flag/env overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let project_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let config = Config::discover(cli.config.as_deref(), &project_dir)
        .map_err(error::CommandError::config)?;

    Ok(config.with_overrides(cli.stage.clone(), cli.region.clone(), cli.profile.clone()))
}

/// Main entry point for the CLI logic
///
/// Best-effort operations that fail are logged and still exit successfully;
/// only terminal operations (and doctor) return an error.
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - Configuration loading fails
/// - A terminal operation fails
pub fn run(cli: Cli) -> Result<()> {
    stackrun_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    let context = RuntimeContext::new(config);

    if let Some(name) = cli.command.operation() {
        let outcome = cmd::operation::OperationCommand { name }.execute(&context)?;
        if let Outcome::Logged(message) = outcome {
            tracing::debug!("{} finished with a logged failure: {}", name, message);
        }
        return Ok(());
    }

    match cli.command {
        Commands::Doctor => cmd::doctor::DoctorCommand.execute(&context)?,
        Commands::Operations => cmd::operations::OperationsCommand.execute(&context)?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use clap::CommandFactory;
    use stackrun_engine::OperationTable;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_operation_names_are_registered() {
        for command in [
            Commands::SyncToS3,
            Commands::EmptyBucket,
            Commands::BucketInfo,
            Commands::DomainInfo,
            Commands::InvalidateCloudFrontCache,
            Commands::Publish,
        ] {
            let name = command.operation().unwrap();
            assert!(OperationTable.get(name).is_some(), "{name} not registered");
        }
        assert_eq!(Commands::Doctor.operation(), None);
    }

    #[test]
    fn test_subcommand_names_match_operations() {
        let cli = Cli::try_parse_from(["stackrun", "invalidateCloudFrontCache", "--stage", "prod"])
            .unwrap();
        assert_eq!(cli.command, Commands::InvalidateCloudFrontCache);
        assert_eq!(cli.stage.as_deref(), Some("prod"));

        assert!(Cli::try_parse_from(["stackrun", "sync-to-s3"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stackrun",
            "syncToS3",
            "--region",
            "eu-west-1",
            "--profile",
            "deploy",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cli.profile.as_deref(), Some("deploy"));
        assert!(cli.verbose);
    }
}
