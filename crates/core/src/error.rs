//! Base error types for stackrun
//!
//! This module provides the foundation error types that all crates can use
//! at the trait seams defined in [`crate::traits`].

use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The external program could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A provider query failed (network, auth, throttling, missing stack)
    #[error("{provider} request failed: {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error reported by the provider
        message: String,
    },

    /// A provider response could not be interpreted
    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        /// Provider name
        provider: String,
        /// What could not be parsed
        message: String,
    },

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
