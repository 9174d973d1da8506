//! Deployment operations
//!
//! Each operation is a fixed pipeline: resolve an output, build tokens, run
//! one command, log the outcome.
//!
//! | Operation | Failure handling |
//! |---|---|
//! | [`sync`] | runner failure is logged and returned as [`CommandOutcome::Failed`] |
//! | [`empty`] | same as sync |
//! | [`bucket_info`] | never fails on a missing output, logs `Not Found` |
//! | [`domain_info`] | same as bucket info, returns the value |
//! | [`invalidate_cache`] | every failure is an `Err` |
//!
//! Provider failures ([`Error::ResolutionFailed`]) propagate from all of them;
//! the operation table decides whether that ends up as a log line or as a
//! terminal error.

use crate::deployment::Deployment;
use crate::error::{Error, Result};
use stackrun_core::{CommandResult, DistributionDescriptor};
use std::fmt;
use tracing::{error, info, warn};

/// Placeholder rendered for an output the stack does not expose
pub const NOT_FOUND: &str = "Not Found";

/// Outcome of an operation that runs one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command wrote nothing to stderr
    Completed(CommandResult),
    /// The command wrote to stderr; the text has been logged
    Failed(CommandResult),
    /// A required output was missing, nothing was run
    Skipped {
        /// Output key that could not be resolved
        missing_output: String,
    },
}

impl CommandOutcome {
    /// Whether the command ran and succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// A resolved (or missing) output value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    /// Output key that was looked up
    pub key: String,
    /// Value, `None` when the stack does not expose the key
    pub value: Option<String>,
}

impl OutputInfo {
    /// Value, or the `Not Found` placeholder
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(NOT_FOUND)
    }
}

impl fmt::Display for OutputInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_value())
    }
}

/// A successful cache invalidation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    /// Domain the distribution was matched on
    pub domain: String,
    /// Distribution that was invalidated
    pub distribution_id: String,
    /// Output of `create-invalidation`
    pub result: CommandResult,
}

/// Result of running an operation through the operation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Sync or empty
    Command(CommandOutcome),
    /// Bucket or domain info
    Info(OutputInfo),
    /// Cache invalidation
    Invalidated(Invalidation),
    /// Sync followed by invalidation
    Published {
        /// Sync step, `None` when it failed before running a command
        sync: Option<CommandOutcome>,
        /// Invalidation step
        invalidation: Invalidation,
    },
    /// A best-effort operation failed; the error has been logged
    Logged(String),
}

/// Log a runner result and turn it into an outcome
fn command_outcome(result: CommandResult, success_message: &str) -> CommandOutcome {
    if result.is_success() {
        info!("{}", success_message);
        CommandOutcome::Completed(result)
    } else {
        error!("{}", result.stderr().trim_end());
        CommandOutcome::Failed(result)
    }
}

/// `s3://<bucket>/`
fn bucket_uri(bucket: &str) -> String {
    format!("s3://{bucket}/")
}

/// Upload the local directory to the stack's bucket
///
/// Runs `s3 sync <localPath> s3://<bucket>/` (plus `--delete` and any extra
/// arguments from the settings).
pub fn sync(deployment: &Deployment<'_>) -> Result<CommandOutcome> {
    let settings = deployment.settings();

    let Some(bucket) = deployment.resolve(&settings.bucket_output)? else {
        warn!(
            "Output '{}' not found in stack '{}', nothing to sync",
            settings.bucket_output,
            deployment.stack_name()
        );
        return Ok(CommandOutcome::Skipped {
            missing_output: settings.bucket_output.clone(),
        });
    };

    let mut tokens = vec![
        "s3".to_string(),
        "sync".to_string(),
        settings.local_path.to_string_lossy().into_owned(),
        bucket_uri(&bucket),
    ];
    if settings.delete {
        tokens.push("--delete".to_string());
    }
    tokens.extend(settings.extra_args.iter().cloned());

    let result = deployment.runner().run(tokens)?;
    Ok(command_outcome(result, "Successfully synced to the S3 bucket"))
}

/// Delete every object in the stack's bucket
///
/// Runs `s3 rm s3://<bucket>/ --recursive`.
pub fn empty(deployment: &Deployment<'_>) -> Result<CommandOutcome> {
    let settings = deployment.settings();

    let Some(bucket) = deployment.resolve(&settings.bucket_output)? else {
        warn!(
            "Output '{}' not found in stack '{}', nothing to empty",
            settings.bucket_output,
            deployment.stack_name()
        );
        return Ok(CommandOutcome::Skipped {
            missing_output: settings.bucket_output.clone(),
        });
    };

    let result = deployment
        .runner()
        .run(["s3", "rm", &bucket_uri(&bucket), "--recursive"])?;
    Ok(command_outcome(result, "Successfully emptied the S3 bucket"))
}

/// Log the bucket name (or `Not Found`)
pub fn bucket_info(deployment: &Deployment<'_>) -> Result<OutputInfo> {
    let key = &deployment.settings().bucket_output;
    let info = OutputInfo {
        key: key.clone(),
        value: deployment.resolve(key)?,
    };

    info!("Bucket name: {}", info);
    Ok(info)
}

/// Log the distribution domain (or `Not Found`) and return it
pub fn domain_info(deployment: &Deployment<'_>) -> Result<OutputInfo> {
    let key = &deployment.settings().domain_output;
    let info = OutputInfo {
        key: key.clone(),
        value: deployment.resolve(key)?,
    };

    info!("Web app domain: {}", info);
    Ok(info)
}

/// First distribution serving exactly `domain`
pub fn match_distribution<'d>(
    distributions: &'d [DistributionDescriptor],
    domain: &str,
) -> Option<&'d DistributionDescriptor> {
    distributions
        .iter()
        .find(|distribution| distribution.domain_name == domain)
}

/// Invalidate every configured path on the distribution serving the domain
///
/// Fails with [`Error::OutputRequired`] when the domain output is missing,
/// [`Error::DistributionNotMatched`] when no distribution serves it (no
/// command is run in either case), and [`Error::CommandFailed`] when
/// `create-invalidation` writes to stderr.
pub fn invalidate_cache(deployment: &Deployment<'_>) -> Result<Invalidation> {
    let domain = domain_info(deployment)?;
    let Some(domain) = domain.value else {
        return Err(Error::OutputRequired {
            key: domain.key,
            stack: deployment.stack_name(),
        });
    };

    let distributions = deployment
        .provider()
        .list_distributions(deployment.stage(), deployment.region())
        .map_err(|source| Error::ResolutionFailed {
            what: "CloudFront distributions".to_string(),
            source,
        })?;

    let Some(distribution) = match_distribution(&distributions, &domain) else {
        return Err(Error::DistributionNotMatched { domain });
    };
    let distribution_id = distribution.id.clone();

    let mut tokens = vec![
        "cloudfront".to_string(),
        "create-invalidation".to_string(),
        "--distribution-id".to_string(),
        distribution_id.clone(),
        "--paths".to_string(),
    ];
    tokens.extend(deployment.settings().invalidation_paths.iter().cloned());

    let invocation = deployment.runner().invocation(tokens);
    let result = deployment.runner().execute(&invocation)?;

    if !result.is_success() {
        error!("{}", result.stderr().trim_end());
        return Err(Error::CommandFailed {
            invocation: invocation.to_string(),
            stderr: result.stderr().trim_end().to_string(),
        });
    }

    info!("Successfully invalidated CloudFront cache");
    Ok(Invalidation {
        domain,
        distribution_id,
        result,
    })
}

/// Sync, then invalidate the cache
///
/// The sync step stays best-effort: its failures are logged and the
/// invalidation still runs. Invalidation failures are returned.
pub fn publish(deployment: &Deployment<'_>) -> Result<Outcome> {
    let sync = match sync(deployment) {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            error!("Sync failed: {}", e);
            None
        }
    };

    let invalidation = invalidate_cache(deployment)?;
    Ok(Outcome::Published { sync, invalidation })
}
