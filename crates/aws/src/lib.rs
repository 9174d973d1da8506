//! AWS command-line integration for stackrun
//!
//! This crate implements the two seams from `stackrun-core` on top of the
//! `aws` CLI:
//!
//! - [`AwsCli`]: [`StackProvider`](stackrun_core::StackProvider) backed by
//!   `aws cloudformation describe-stacks` and `aws cloudfront list-distributions`
//! - [`ProcessExecutor`]: [`CommandExecutor`](stackrun_core::CommandExecutor)
//!   that runs a program and captures both streams without looking at the
//!   exit status
//!
//! Credentials are never handled here; the `aws` CLI reads its own
//! configuration and the optional `--profile` is passed through.

use thiserror::Error;

pub mod cli;
pub mod process;
pub mod response;

pub use cli::AwsCli;
pub use process::ProcessExecutor;

/// Result type for AWS CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the AWS CLI integration
#[derive(Error, Debug)]
pub enum Error {
    #[error("Provider not available: {0}")]
    ProviderNotAvailable(String),

    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Stack not found: {0}")]
    StackNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Convert into the shared error type, tagging it with the provider name
    pub(crate) fn into_core(self, provider: &str) -> stackrun_core::Error {
        match self {
            Self::ParseError(message) => stackrun_core::Error::Parse {
                provider: provider.to_string(),
                message,
            },
            Self::Json(e) => stackrun_core::Error::Parse {
                provider: provider.to_string(),
                message: e.to_string(),
            },
            Self::Io(e) => stackrun_core::Error::Io(e),
            other => stackrun_core::Error::Provider {
                provider: provider.to_string(),
                message: other.to_string(),
            },
        }
    }
}
