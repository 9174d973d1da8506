//! Operation table
//!
//! A fixed, immutable mapping from the externally visible operation names to
//! the functions implementing them. Adding an operation is a new entry in
//! [`OPERATIONS`].

use crate::deployment::Deployment;
use crate::error::{Error, Result};
use crate::operations::{self, Outcome};
use tracing::{error, instrument};

/// What happens when an operation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Log the failure and return normally
    BestEffort,
    /// Return the failure to the caller
    Terminal,
}

/// One registered operation
#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    /// Externally visible name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Failure policy
    pub escalation: Escalation,
    /// Implementation
    pub run: fn(&Deployment<'_>) -> Result<Outcome>,
}

fn run_sync(deployment: &Deployment<'_>) -> Result<Outcome> {
    operations::sync(deployment).map(Outcome::Command)
}

fn run_empty(deployment: &Deployment<'_>) -> Result<Outcome> {
    operations::empty(deployment).map(Outcome::Command)
}

fn run_bucket_info(deployment: &Deployment<'_>) -> Result<Outcome> {
    operations::bucket_info(deployment).map(Outcome::Info)
}

fn run_domain_info(deployment: &Deployment<'_>) -> Result<Outcome> {
    operations::domain_info(deployment).map(Outcome::Info)
}

fn run_invalidate(deployment: &Deployment<'_>) -> Result<Outcome> {
    operations::invalidate_cache(deployment).map(Outcome::Invalidated)
}

/// Every operation, in display order
pub static OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        name: "syncToS3",
        description: "Upload the local app directory to the stack's S3 bucket",
        escalation: Escalation::BestEffort,
        run: run_sync,
    },
    OperationSpec {
        name: "emptyBucket",
        description: "Delete every object in the stack's S3 bucket",
        escalation: Escalation::BestEffort,
        run: run_empty,
    },
    OperationSpec {
        name: "bucketInfo",
        description: "Print the stack's S3 bucket name",
        escalation: Escalation::BestEffort,
        run: run_bucket_info,
    },
    OperationSpec {
        name: "domainInfo",
        description: "Print the stack's CloudFront domain",
        escalation: Escalation::BestEffort,
        run: run_domain_info,
    },
    OperationSpec {
        name: "invalidateCloudFrontCache",
        description: "Invalidate the CloudFront distribution serving the stack's domain",
        escalation: Escalation::Terminal,
        run: run_invalidate,
    },
    OperationSpec {
        name: "publish",
        description: "Sync to S3, then invalidate the CloudFront cache",
        escalation: Escalation::Terminal,
        run: operations::publish,
    },
];

/// Lookup and dispatch over [`OPERATIONS`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationTable;

impl OperationTable {
    /// Look up an operation by its exact name
    pub fn get(self, name: &str) -> Option<&'static OperationSpec> {
        OPERATIONS.iter().find(|spec| spec.name == name)
    }

    /// All operations, in display order
    pub fn iter(self) -> impl Iterator<Item = &'static OperationSpec> {
        OPERATIONS.iter()
    }

    /// Run the operation registered under `name`
    ///
    /// Failures of best-effort operations are logged and returned as
    /// [`Outcome::Logged`]; failures of terminal operations are returned.
    #[instrument(skip(self, deployment), fields(stack = %deployment.stack_name()))]
    pub fn dispatch(self, name: &str, deployment: &Deployment<'_>) -> Result<Outcome> {
        let spec = self
            .get(name)
            .ok_or_else(|| Error::UnknownOperation(name.to_string()))?;

        match ((spec.run)(deployment), spec.escalation) {
            (Ok(outcome), _) => Ok(outcome),
            (Err(e), Escalation::BestEffort) => {
                error!("{}", e);
                Ok(Outcome::Logged(e.to_string()))
            }
            (Err(e), Escalation::Terminal) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = OperationTable.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), OPERATIONS.len());
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(OperationTable.get("syncToS3").is_some());
        assert!(OperationTable.get("synctos3").is_none());
        assert!(OperationTable.get("deploy").is_none());
    }

    #[test]
    fn test_only_invalidation_paths_are_terminal() {
        let terminal: Vec<_> = OperationTable
            .iter()
            .filter(|spec| spec.escalation == Escalation::Terminal)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(terminal, ["invalidateCloudFrontCache", "publish"]);
    }
}
