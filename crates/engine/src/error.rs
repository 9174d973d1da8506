//! Error types for stackrun-engine
//!
//! A missing output is not an error (it is `None`); everything here is a
//! condition the caller has to decide about.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for stackrun-engine
#[derive(Error, Debug)]
pub enum Error {
    /// The provider query itself failed (network, auth, throttling)
    #[error("Failed to resolve {what}: {source}")]
    ResolutionFailed {
        /// What was being resolved (e.g. "output 'X' of stack 'Y'")
        what: String,
        /// Provider error
        #[source]
        source: stackrun_core::Error,
    },

    /// An output the operation cannot proceed without is absent
    #[error("Output '{key}' not found in stack '{stack}'")]
    OutputRequired {
        /// Output key
        key: String,
        /// Stack that was queried
        stack: String,
    },

    /// No distribution serves the resolved domain
    #[error("Could not find a CloudFront distribution for domain '{domain}'")]
    DistributionNotMatched {
        /// Domain no distribution serves
        domain: String,
    },

    /// The external command wrote to stderr
    #[error("Command failed: {invocation}\n{stderr}")]
    CommandFailed {
        /// Rendered invocation
        invocation: String,
        /// Captured standard error
        stderr: String,
    },

    /// The external command could not be started
    #[error(transparent)]
    Execution(#[from] stackrun_core::Error),

    /// No operation registered under this name
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_distribution_not_matched_names_domain() {
        let error = Error::DistributionNotMatched {
            domain: "d1.example.com".to_string(),
        };
        assert!(error.to_string().contains("d1.example.com"));
    }

    #[test]
    fn test_resolution_failed_keeps_source() {
        use std::error::Error as _;

        let error = Error::ResolutionFailed {
            what: "output 'Bucket' of stack 'app-dev'".to_string(),
            source: stackrun_core::Error::Provider {
                provider: "aws".to_string(),
                message: "ExpiredToken".to_string(),
            },
        };

        let msg = error.to_string();
        assert!(msg.contains("output 'Bucket' of stack 'app-dev'"));
        assert!(msg.contains("ExpiredToken"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_command_failed_includes_stderr() {
        let error = Error::CommandFailed {
            invocation: "aws cloudfront create-invalidation".to_string(),
            stderr: "AccessDenied".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("create-invalidation"));
        assert!(msg.contains("AccessDenied"));
    }
}
