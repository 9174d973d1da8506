//! CLI command implementations

pub mod doctor;
pub mod operation;
pub mod operations;
