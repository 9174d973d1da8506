//! Doctor command implementation
//!
//! Check the cloud CLI is installed and show which stack the other commands
//! would target.

use owo_colors::OwoColorize;
use tracing::debug;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};

const NOT_FOUND: &str = "not found on PATH";
const UNSET: &str = "unset";

/// Resolved target of the current project
#[derive(Debug, Clone, PartialEq, Eq)]
struct DoctorReport {
    program: String,
    program_available: bool,
    project_dir: Option<String>,
    stack_name: String,
    stage: String,
    region: String,
    profile: Option<String>,
}

impl DoctorReport {
    fn collect(context: &RuntimeContext) -> Self {
        let config = &context.config;
        Self {
            program: context.provider.program().to_string(),
            program_available: context.provider.is_available(),
            project_dir: config
                .project_dir()
                .map(|dir| dir.to_string_lossy().into_owned()),
            stack_name: context.naming().stack_name(&config.deploy.stage),
            stage: config.deploy.stage.clone(),
            region: config.deploy.region.clone(),
            profile: config.deploy.profile.clone(),
        }
    }
}

/// Report tool availability and the resolved deployment target
#[derive(Debug, Clone, Copy, Default)]
pub struct DoctorCommand;

impl Command for DoctorCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let report = DoctorReport::collect(context);
        debug!(?report, "Collected doctor report");

        println!("{}", "Tooling".bright_white().bold());
        print_row(
            "Program",
            &report.program,
            report.program_available,
            (!report.program_available).then_some(NOT_FOUND),
        );
        println!();

        println!("{}", "Target".bright_white().bold());
        print_row(
            "Project",
            report.project_dir.as_deref().unwrap_or(UNSET),
            report.project_dir.is_some(),
            None,
        );
        print_row("Stack", &report.stack_name, true, None);
        print_row("Stage", &report.stage, true, None);
        print_row("Region", &report.region, !report.region.is_empty(), None);
        print_row(
            "Profile",
            report.profile.as_deref().unwrap_or(UNSET),
            report.profile.is_some(),
            None,
        );

        if report.program_available {
            Ok(())
        } else {
            Err(CommandError::ProgramNotFound(report.program))
        }
    }
}

/// Print a single row with status indicator
fn print_row(label: &str, value: &str, ok: bool, note: Option<&str>) {
    let symbol = if ok {
        "✓".bright_green().to_string()
    } else if note.is_some() {
        "✗".bright_red().to_string()
    } else {
        "-".dimmed().to_string()
    };

    let formatted_value = if ok {
        value.bright_white().to_string()
    } else {
        value.dimmed().to_string()
    };

    if let Some(note_text) = note {
        println!(
            "  {} {:10} {} {}",
            symbol,
            label,
            formatted_value,
            format!("({note_text})").dimmed()
        );
    } else {
        println!("  {symbol} {label:10} {formatted_value}");
    }
}
