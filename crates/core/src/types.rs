//! Deployment data model
//!
//! Read-only snapshots of what a deployed stack exposes, plus the value types
//! that flow through a single external command execution:
//!
//! - [`StackDescription`] / [`Output`]: named values exposed by one stack
//! - [`DistributionDescriptor`]: a content-delivery distribution (id + domain)
//! - [`InvocationContext`] / [`CommandInvocation`]: the token list handed to the runner
//! - [`RawOutput`] / [`CommandResult`]: what came back
//!
//! # Examples
//!
//! ```
//! use stackrun_core::{InvocationContext, CommandInvocation};
//!
//! let context = InvocationContext::new(Some("us-east-1".into()), Some("p".into()));
//! let invocation = CommandInvocation::build("aws", &context, ["s3", "sync", "a", "b"]);
//! assert_eq!(
//!     invocation.args(),
//!     ["--region", "us-east-1", "--profile", "p", "s3", "sync", "a", "b"]
//! );
//! ```

use std::fmt;

/// A single named value exposed by a deployed stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Output key (unique within a stack)
    pub key: String,
    /// Output value (may legitimately be empty)
    pub value: String,
}

impl Output {
    /// Create a new output entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered outputs of one deployed stack
///
/// Always fetched fresh from the provider; nothing in stackrun caches it
/// across operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackDescription {
    stack_name: String,
    outputs: Vec<Output>,
}

impl StackDescription {
    /// Create a description from the provider's output list
    pub fn new(stack_name: impl Into<String>, outputs: Vec<Output>) -> Self {
        Self {
            stack_name: stack_name.into(),
            outputs,
        }
    }

    /// Name of the described stack
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// All outputs in provider order
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Look up an output by exact key
    ///
    /// Returns `None` when the stack does not expose `key`. An output whose
    /// value is the empty string is returned as `Some("")`.
    ///
    /// ```
    /// use stackrun_core::{Output, StackDescription};
    ///
    /// let stack = StackDescription::new("app-dev", vec![
    ///     Output::new("Bucket", "my-bucket"),
    ///     Output::new("Empty", ""),
    /// ]);
    /// assert_eq!(stack.output("Bucket"), Some("my-bucket"));
    /// assert_eq!(stack.output("Empty"), Some(""));
    /// assert_eq!(stack.output("bucket"), None);
    /// ```
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|output| output.key == key)
            .map(|output| output.value.as_str())
    }
}

/// A content-delivery distribution as returned by a listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionDescriptor {
    /// Distribution id (e.g. `E2QWRUHAPOMQZL`)
    pub id: String,
    /// Domain the distribution serves (e.g. `d111111abcdef8.cloudfront.net`)
    pub domain_name: String,
}

impl DistributionDescriptor {
    /// Create a new descriptor
    pub fn new(id: impl Into<String>, domain_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain_name: domain_name.into(),
        }
    }
}

/// Global modifiers prepended to every invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationContext {
    /// Target region (`--region`)
    pub region: Option<String>,
    /// Credential profile (`--profile`)
    pub profile: Option<String>,
}

impl InvocationContext {
    /// Create a context from optional region and profile
    pub fn new(region: Option<String>, profile: Option<String>) -> Self {
        Self { region, profile }
    }
}

/// A fully built external command: program plus final argument tokens
///
/// Built once, executed once, then discarded. There is no way to mutate the
/// tokens after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: String,
    args: Vec<String>,
}

impl CommandInvocation {
    /// Build the final invocation
    ///
    /// Order is fixed: `--region <r>` when set, then `--profile <p>` when set,
    /// then the caller tokens unchanged.
    pub fn build<I, S>(program: impl Into<String>, context: &InvocationContext, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Vec::new();

        if let Some(region) = &context.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        if let Some(profile) = &context.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        args.extend(tokens.into_iter().map(Into::into));

        Self {
            program: program.into(),
            args,
        }
    }

    /// Program to execute
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Final argument tokens (global modifiers included)
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        write!(f, "{}", shell_words::join(words))
    }
}

/// Captured streams of a finished process, as handed back by an executor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawOutput {
    /// Captured standard output bytes
    pub stdout: Vec<u8>,
    /// Captured standard error bytes
    pub stderr: Vec<u8>,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
}

/// Outcome of one external command execution
///
/// The verdict is derived from standard error only: the command succeeded iff
/// nothing was written to stderr. The exit code is kept for diagnostics and is
/// never consulted by [`CommandResult::is_success`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    stdout: String,
    stderr: String,
    exit_code: Option<i32>,
}

impl CommandResult {
    /// Create a result from already-decoded streams
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Captured standard output
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Captured standard error
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Exit code reported by the process (diagnostic only)
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Success iff standard error is the empty string
    pub fn is_success(&self) -> bool {
        self.stderr.is_empty()
    }
}

impl From<RawOutput> for CommandResult {
    fn from(raw: RawOutput) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&raw.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&raw.stderr).into_owned(),
            exit_code: raw.exit_code,
        }
    }
}
