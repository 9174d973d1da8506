//! `aws` CLI stack provider
//!
//! Answers the two provider queries by running the `aws` CLI with
//! `--output json` and parsing its response:
//!
//! - `aws cloudformation describe-stacks --stack-name <name>`
//! - `aws cloudfront list-distributions`
//!
//! Unlike the command runner, provider queries DO look at the exit status:
//! a failed query is a resolution failure, not a "not found".

use crate::response::{parse_distributions, parse_stack_description};
use crate::{Error, Result};
use stackrun_core::{DistributionDescriptor, StackDescription, StackProvider};
use tracing::debug;

/// Default program name for the AWS CLI
pub const DEFAULT_PROGRAM: &str = "aws";

/// Stack provider backed by the `aws` CLI
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
    profile: Option<String>,
}

impl AwsCli {
    /// Create a provider using `aws` from `PATH` and the default profile
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            profile: None,
        }
    }

    /// Use a different program (e.g. an absolute path or a wrapper script)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Pass `--profile <profile>` to every query
    #[must_use]
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Program this provider runs
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if the CLI is installed and on `PATH`
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Build the argument list for a JSON query
    fn query_args(&self, region: &str, args: &[&str]) -> Vec<String> {
        let mut cmd_args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();

        if !region.is_empty() {
            cmd_args.push("--region".to_string());
            cmd_args.push(region.to_string());
        }
        if let Some(profile) = &self.profile {
            cmd_args.push("--profile".to_string());
            cmd_args.push(profile.clone());
        }
        cmd_args.push("--output".to_string());
        cmd_args.push("json".to_string());

        cmd_args
    }

    /// Run a query and return its stdout
    fn query(&self, region: &str, args: &[&str]) -> Result<String> {
        let cmd_args = self.query_args(region, args);
        debug!("Querying: {} {:?}", self.program, cmd_args);

        let output = duct::cmd(&self.program, &cmd_args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ProviderNotAvailable(format!(
                        "'{}' not found. Install the AWS CLI and make sure it is on PATH",
                        self.program
                    ))
                } else {
                    Error::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ExecutionFailed(if stderr.trim().is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr.trim().to_string()
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Fetch and parse a stack description
    #[tracing::instrument(skip(self), fields(program = %self.program))]
    pub fn describe_stack_json(&self, stack_name: &str, region: &str) -> Result<StackDescription> {
        let stdout = self.query(
            region,
            &["cloudformation", "describe-stacks", "--stack-name", stack_name],
        )?;
        parse_stack_description(stack_name, &stdout)
    }

    /// Fetch and parse the distribution list
    #[tracing::instrument(skip(self), fields(program = %self.program))]
    pub fn list_distributions_json(&self, region: &str) -> Result<Vec<DistributionDescriptor>> {
        let stdout = self.query(region, &["cloudfront", "list-distributions"])?;
        parse_distributions(&stdout)
    }
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new()
    }
}

impl StackProvider for AwsCli {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn describe_stack(
        &self,
        stack_name: &str,
        stage: &str,
        region: &str,
    ) -> stackrun_core::Result<StackDescription> {
        debug!(stage = %stage, "Describing stack {}", stack_name);
        self.describe_stack_json(stack_name, region)
            .map_err(|e| e.into_core(StackProvider::name(self)))
    }

    fn list_distributions(
        &self,
        stage: &str,
        region: &str,
    ) -> stackrun_core::Result<Vec<DistributionDescriptor>> {
        debug!(stage = %stage, "Listing distributions");
        self.list_distributions_json(region)
            .map_err(|e| e.into_core(StackProvider::name(self)))
    }
}
