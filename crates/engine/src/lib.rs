//! # stackrun engine
//!
//! The deployment-output-driven command runner.
//!
//! - **Naming**: Deriving a stack name from service and stage
//! - **Resolver**: Looking up a named output of the deployed stack
//! - **Runner**: Executing an external command with global modifiers prepended
//! - **Operations**: Sync, empty, bucket/domain info, cache invalidation, publish
//! - **Registry**: The immutable table mapping operation names to functions

pub mod deployment;
pub mod error;
pub mod naming;
pub mod operations;
pub mod registry;
pub mod resolver;
pub mod runner;

pub use deployment::{Deployment, Settings, Target};
pub use error::{Error, Result};
pub use naming::StackNaming;
pub use operations::{CommandOutcome, Invalidation, NOT_FOUND, OutputInfo, Outcome};
pub use registry::{Escalation, OperationSpec, OperationTable};
pub use resolver::OutputResolver;
pub use runner::CommandRunner;
