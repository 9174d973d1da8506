//! Core types and traits for stackrun
//!
//! This is the foundation crate (Layer 0) that all other stackrun crates depend on.
//! It provides:
//! - The deployment data model (stack outputs, distributions)
//! - Command invocation and result types
//! - Base error types
//! - Seam traits for the provider query and command execution interfaces
//!
//! This crate performs no I/O and has no dependencies on other stackrun crates.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{CommandExecutor, StackProvider};
pub use types::{
    CommandInvocation, CommandResult, DistributionDescriptor, InvocationContext, Output,
    RawOutput, StackDescription,
};
