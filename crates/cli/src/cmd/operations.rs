//! List the registered operations

use owo_colors::OwoColorize;
use stackrun_engine::{Escalation, OperationTable};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Print the operation table
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationsCommand;

impl Command for OperationsCommand {
    type Output = ();

    fn execute(&self, _context: &RuntimeContext) -> Result<()> {
        let width = OperationTable
            .iter()
            .map(|spec| spec.name.len())
            .max()
            .unwrap_or(0);

        for spec in OperationTable.iter() {
            let policy = match spec.escalation {
                Escalation::BestEffort => format!("{:<11}", "best-effort").dimmed().to_string(),
                Escalation::Terminal => format!("{:<11}", "terminal").yellow().to_string(),
            };
            println!(
                "{}  {}  {}",
                format!("{:<width$}", spec.name).bold(),
                policy,
                spec.description
            );
        }

        Ok(())
    }
}
