//! Progress indicators
//!
//! A spinner shown while an external command runs, using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use stackrun_core::{CommandExecutor, RawOutput, Result};
use std::time::Duration;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Executor decorator that spins while the wrapped executor runs
pub struct SpinnerExecutor<E> {
    inner: E,
}

impl<E: CommandExecutor> SpinnerExecutor<E> {
    /// Wrap `inner`
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: CommandExecutor> CommandExecutor for SpinnerExecutor<E> {
    fn execute(&self, program: &str, args: &[String]) -> Result<RawOutput> {
        let spinner = create_spinner(&format!("{program} {}", command_label(args)));
        let result = self.inner.execute(program, args);
        spinner.finish_and_clear();
        result
    }
}

/// First two tokens after the leading `--flag value` modifiers
fn command_label(args: &[String]) -> String {
    let mut rest = args;
    while let [flag, _, tail @ ..] = rest
        && flag.starts_with("--")
    {
        rest = tail;
    }

    rest.iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
