//! Error types for CLI commands
//!
//! Engine errors stay typed up to the command boundary so the exit policy can
//! be decided here rather than inside the operations.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A terminal operation failed
    #[error("Operation '{operation}' failed")]
    OperationFailed {
        /// Name of the operation
        operation: String,
        /// Engine error
        #[source]
        source: stackrun_engine::Error,
    },

    /// The configured cloud CLI program is not installed
    #[error("'{0}' not found on PATH")]
    ProgramNotFound(String),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// Create a `ConfigError` from any error type
    pub fn config<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::ConfigError(Box::new(err))
    }

    /// Wrap an engine error raised by `operation`
    pub fn operation(operation: impl Into<String>, source: stackrun_engine::Error) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_config_error() {
        let io_error = io::Error::new(io::ErrorKind::InvalidData, "invalid config");
        let error = CommandError::config(io_error);

        let error_msg = error.to_string();
        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("invalid config"));
    }

    #[test]
    fn test_operation_failed_keeps_engine_error() {
        let error = CommandError::operation(
            "invalidateCloudFrontCache",
            stackrun_engine::Error::DistributionNotMatched {
                domain: "d1.example.com".to_string(),
            },
        );

        assert!(error.to_string().contains("invalidateCloudFrontCache"));
        let source = error.source().unwrap();
        assert!(source.to_string().contains("d1.example.com"));

        // anyhow's alternate format walks the chain, as main prints it
        let rendered = format!("{:#}", anyhow::Error::new(error));
        assert!(rendered.contains("d1.example.com"));
    }

    #[test]
    fn test_program_not_found() {
        let error = CommandError::ProgramNotFound("aws".to_string());
        assert_eq!(error.to_string(), "'aws' not found on PATH");
    }
}
