//! Command trait for stackrun CLI
//!
//! Every subcommand receives the same [`RuntimeContext`] and reports failures
//! as a [`CommandError`](crate::error::CommandError).

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all stackrun commands
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
///
/// pub struct StackNameCommand;
///
/// impl Command for StackNameCommand {
///     type Output = String;
///
///     fn execute(&self, context: &RuntimeContext) -> Result<String> {
///         Ok(context.naming().stack_name(&context.config.deploy.stage))
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute. Error messages should
    /// be descriptive enough for the user to understand what went wrong.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
