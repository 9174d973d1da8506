//! Process-backed command executor
//!
//! Runs the program to completion with both streams captured. The exit status
//! is recorded but never turned into an error: deciding what counts as a
//! failure belongs to the caller.

use stackrun_core::{CommandExecutor, Error, RawOutput, Result};
use tracing::debug;

/// Executes commands as child processes using duct
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Create a new process executor
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    #[tracing::instrument(skip(self, args), fields(program = %program))]
    fn execute(&self, program: &str, args: &[String]) -> Result<RawOutput> {
        debug!("Executing: {} {:?}", program, args);

        let output = duct::cmd(program, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        debug!(
            "Exited with {:?} ({} bytes stdout, {} bytes stderr)",
            output.status.code(),
            output.stdout.len(),
            output.stderr.len()
        );

        Ok(RawOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use stackrun_core::CommandResult;

    fn sh(script: &str) -> CommandResult {
        ProcessExecutor::new()
            .execute("sh", &["-c".to_string(), script.to_string()])
            .unwrap()
            .into()
    }

    #[test]
    fn test_captures_stdout() {
        let result = sh("echo hello");
        assert_eq!(result.stdout(), "hello\n");
        assert_eq!(result.stderr(), "");
        assert_eq!(result.exit_code(), Some(0));
        assert!(result.is_success());
    }

    #[test]
    fn test_nonzero_exit_without_stderr_is_success() {
        let result = sh("exit 3");
        assert_eq!(result.exit_code(), Some(3));
        assert!(result.is_success());
    }

    #[test]
    fn test_stderr_with_zero_exit_is_failure() {
        let result = sh("echo 'warning: deprecated' >&2; exit 0");
        assert_eq!(result.exit_code(), Some(0));
        assert_eq!(result.stderr(), "warning: deprecated\n");
        assert!(!result.is_success());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = ProcessExecutor::new()
            .execute("stackrun-definitely-not-installed", &[])
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { ref program, .. } if program == "stackrun-definitely-not-installed"));
    }
}
