//! Configuration management for stackrun
//!
//! This crate handles:
//! - Configuration loading and validation (`stackrun.toml`)
//! - XDG directory management
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod logging;

// Re-export error types from core
pub use stackrun_core::{Error, Result};

// Re-export main types
pub use config::{
    AwsConfig, Config, DeployConfig, InvalidationConfig, OutputsConfig, ServiceConfig,
    SyncConfig,
};
pub use dirs::{config_dir, default_config_file};
