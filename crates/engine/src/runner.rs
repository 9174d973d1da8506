//! Command runner
//!
//! Prepends the global modifiers (`--region`, then `--profile`) to the caller
//! tokens, executes synchronously and captures both streams.
//!
//! The verdict is the stderr heuristic of [`CommandResult::is_success`]: an
//! empty stderr is success, anything else is failure, and the exit status is
//! not consulted. A command that exits non-zero without writing to stderr is
//! therefore reported as a success. This is kept for compatibility with
//! existing callers.
//!
//! No timeout, dry-run or rollback: whatever the command does is real.

use crate::error::Result;
use stackrun_core::{CommandExecutor, CommandInvocation, CommandResult, InvocationContext};
use tracing::{debug, instrument};

/// Runs external commands for one target environment
pub struct CommandRunner<'a> {
    executor: &'a dyn CommandExecutor,
    program: String,
    context: InvocationContext,
}

impl<'a> CommandRunner<'a> {
    /// Create a runner for `program` with global modifiers from `context`
    pub fn new(
        executor: &'a dyn CommandExecutor,
        program: impl Into<String>,
        context: InvocationContext,
    ) -> Self {
        Self {
            executor,
            program: program.into(),
            context,
        }
    }

    /// Global modifiers prepended to every invocation
    pub fn context(&self) -> &InvocationContext {
        &self.context
    }

    /// Build the final invocation without running it
    pub fn invocation<I, S>(&self, tokens: I) -> CommandInvocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandInvocation::build(self.program.clone(), &self.context, tokens)
    }

    /// Execute an already-built invocation once
    #[instrument(skip(self, invocation), fields(program = %invocation.program()))]
    pub fn execute(&self, invocation: &CommandInvocation) -> Result<CommandResult> {
        debug!("Running: {}", invocation);

        let raw = self
            .executor
            .execute(invocation.program(), invocation.args())?;
        let result = CommandResult::from(raw);

        debug!(
            success = result.is_success(),
            exit_code = ?result.exit_code(),
            "Command finished"
        );

        Ok(result)
    }

    /// Build and execute `tokens`
    ///
    /// Only a failure to start the process is an `Err`; a failed command is
    /// an `Ok` result whose [`CommandResult::is_success`] is false.
    pub fn run<I, S>(&self, tokens: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = self.invocation(tokens);
        self.execute(&invocation)
    }
}
