//! Core behavioral traits for stackrun components
//!
//! These are the two seams between the engine and the outside world:
//! the provider query interface and the external command execution interface.
//! The engine only depends on these traits, so tests can swap in in-memory
//! fakes and the `aws` integration stays in its own crate.

use crate::Result;
use crate::types::{DistributionDescriptor, RawOutput, StackDescription};

/// Deployment provider query interface
///
/// Implementations perform the remote calls; callers treat them as opaque.
/// Any transport, authentication or throttling failure must surface as an
/// `Err`, never as an empty description.
///
/// # Examples
///
/// ```ignore
/// fn bucket(provider: &dyn StackProvider) -> Result<Option<String>> {
///     let stack = provider.describe_stack("app-dev", "dev", "us-east-1")?;
///     Ok(stack.output("WebAppS3BucketOutput").map(str::to_string))
/// }
/// ```
pub trait StackProvider {
    /// Get the name of this provider (e.g. "aws")
    fn name(&self) -> &str;

    /// Describe a deployed stack and return its outputs
    fn describe_stack(&self, stack_name: &str, stage: &str, region: &str)
    -> Result<StackDescription>;

    /// List the content-delivery distributions visible to the caller
    fn list_distributions(&self, stage: &str, region: &str) -> Result<Vec<DistributionDescriptor>>;
}

/// External command execution interface
///
/// Runs `program` with `args` to completion and hands back the captured
/// streams. A non-zero exit status is NOT an error at this level; only a
/// failure to start the process is.
pub trait CommandExecutor {
    /// Execute a program synchronously and capture its output
    fn execute(&self, program: &str, args: &[String]) -> Result<RawOutput>;
}

impl<T: StackProvider + ?Sized> StackProvider for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn describe_stack(
        &self,
        stack_name: &str,
        stage: &str,
        region: &str,
    ) -> Result<StackDescription> {
        (**self).describe_stack(stack_name, stage, region)
    }

    fn list_distributions(&self, stage: &str, region: &str) -> Result<Vec<DistributionDescriptor>> {
        (**self).list_distributions(stage, region)
    }
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, program: &str, args: &[String]) -> Result<RawOutput> {
        (**self).execute(program, args)
    }
}
