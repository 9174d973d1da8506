//! Run one registered deployment operation

use std::io::IsTerminal;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};
use crate::ui::SpinnerExecutor;
use stackrun_aws::ProcessExecutor;
use stackrun_core::CommandExecutor;
use stackrun_engine::{OperationTable, Outcome};
use tracing::debug;

/// Dispatch an operation through the operation table
#[derive(Debug, Clone, Copy)]
pub struct OperationCommand {
    /// Registered operation name
    pub name: &'static str,
}

impl OperationCommand {
    fn dispatch(&self, context: &RuntimeContext, executor: &dyn CommandExecutor) -> Result<Outcome> {
        let deployment = context.deployment(executor);
        OperationTable
            .dispatch(self.name, &deployment)
            .map_err(|e| CommandError::operation(self.name, e))
    }
}

/// The spinner draws on stderr, so only spin when stderr is a terminal
fn spinner_enabled() -> bool {
    std::io::stderr().is_terminal()
}

impl Command for OperationCommand {
    type Output = Outcome;

    fn execute(&self, context: &RuntimeContext) -> Result<Outcome> {
        let outcome = if spinner_enabled() {
            self.dispatch(context, &SpinnerExecutor::new(ProcessExecutor))?
        } else {
            self.dispatch(context, &ProcessExecutor)?
        };

        debug!(operation = self.name, "Operation finished");
        Ok(outcome)
    }
}
