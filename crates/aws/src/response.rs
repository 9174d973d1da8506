//! JSON response shapes of the `aws` CLI
//!
//! Only the fields stackrun reads are modelled; everything else in the
//! response is ignored by serde.
//!
//! ```json
//! {"Stacks":[{"StackName":"app-dev","Outputs":[{"OutputKey":"...","OutputValue":"..."}]}]}
//! {"DistributionList":{"Items":[{"Id":"E123","DomainName":"d1.cloudfront.net"}]}}
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use stackrun_core::{DistributionDescriptor, Output, StackDescription};

/// `aws cloudformation describe-stacks` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStacksResponse {
    #[serde(default)]
    pub stacks: Vec<StackEntry>,
}

/// One stack in a describe-stacks response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackEntry {
    pub stack_name: String,
    /// Absent when the template declares no outputs
    #[serde(default)]
    pub outputs: Vec<OutputEntry>,
}

/// One output of a stack
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputEntry {
    pub output_key: String,
    #[serde(default)]
    pub output_value: String,
}

/// `aws cloudfront list-distributions` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListDistributionsResponse {
    /// Absent when the account has no distributions
    #[serde(default)]
    pub distribution_list: Option<DistributionList>,
}

/// Paginated distribution list (the CLI merges pages by default)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionList {
    #[serde(default)]
    pub items: Vec<DistributionSummary>,
}

/// One distribution in a list-distributions response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionSummary {
    pub id: String,
    pub domain_name: String,
}

/// Parse describe-stacks output into a [`StackDescription`] for `stack_name`
///
/// The CLI answers a single-name query with a single stack; if several come
/// back the one with the exact name is preferred, then the first.
pub fn parse_stack_description(stack_name: &str, stdout: &str) -> Result<StackDescription> {
    if stdout.trim().is_empty() {
        return Err(Error::ParseError("Empty output".to_string()));
    }

    let response: DescribeStacksResponse = serde_json::from_str(stdout)?;
    let mut stacks = response.stacks;

    let index = stacks
        .iter()
        .position(|stack| stack.stack_name == stack_name)
        .unwrap_or(0);
    if index >= stacks.len() {
        return Err(Error::StackNotFound(stack_name.to_string()));
    }
    let stack = stacks.swap_remove(index);

    let outputs = stack
        .outputs
        .into_iter()
        .map(|entry| Output::new(entry.output_key, entry.output_value))
        .collect();

    Ok(StackDescription::new(stack.stack_name, outputs))
}

/// Parse list-distributions output, preserving provider order
pub fn parse_distributions(stdout: &str) -> Result<Vec<DistributionDescriptor>> {
    if stdout.trim().is_empty() {
        return Err(Error::ParseError("Empty output".to_string()));
    }

    let response: ListDistributionsResponse = serde_json::from_str(stdout)?;

    Ok(response
        .distribution_list
        .map(|list| list.items)
        .unwrap_or_default()
        .into_iter()
        .map(|item| DistributionDescriptor::new(item.id, item.domain_name))
        .collect())
}
