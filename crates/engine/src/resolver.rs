//! Output resolver
//!
//! Looks up one named output of the deployed stack. Every call issues exactly
//! one fresh describe request; nothing is cached between calls because
//! outputs can change between commands.

use crate::error::{Error, Result};
use crate::naming::StackNaming;
use stackrun_core::StackProvider;
use tracing::debug;

/// Resolves stack outputs through a provider
pub struct OutputResolver<'a> {
    provider: &'a dyn StackProvider,
    naming: StackNaming,
}

impl<'a> OutputResolver<'a> {
    /// Create a resolver for stacks named by `naming`
    pub fn new(provider: &'a dyn StackProvider, naming: StackNaming) -> Self {
        Self { provider, naming }
    }

    /// Stack name this resolver queries for `stage`
    pub fn stack_name(&self, stage: &str) -> String {
        self.naming.stack_name(stage)
    }

    /// Resolve `output_key` for the stack deployed at `stage`
    ///
    /// Returns `Ok(None)` when the stack does not expose the key and
    /// `Ok(Some(""))` when it exposes an empty value. A failing provider
    /// request is [`Error::ResolutionFailed`].
    pub fn resolve(&self, output_key: &str, stage: &str, region: &str) -> Result<Option<String>> {
        let stack_name = self.stack_name(stage);
        debug!("Resolving output '{}' of stack '{}'", output_key, stack_name);

        let stack = self
            .provider
            .describe_stack(&stack_name, stage, region)
            .map_err(|source| Error::ResolutionFailed {
                what: format!("output '{output_key}' of stack '{stack_name}'"),
                source,
            })?;

        let value = stack.output(output_key).map(str::to_string);
        if value.is_none() {
            debug!(
                "Stack '{}' has no output '{}' ({} outputs)",
                stack_name,
                output_key,
                stack.outputs().len()
            );
        }

        Ok(value)
    }
}
