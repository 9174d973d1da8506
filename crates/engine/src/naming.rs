//! Stack naming
//!
//! A deployed stack is identified by `<service>-<stage>` unless the
//! configuration pins an explicit name.

use stackrun_config::Config;

/// How the stack name is derived from a stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackNaming {
    /// `<service>-<stage>`
    Service(String),
    /// Fixed name, independent of the stage
    Explicit(String),
}

impl StackNaming {
    /// Naming rule for a configuration
    ///
    /// An explicit `stackName` wins; otherwise the service name is used, and
    /// when that is missing too the project directory's name stands in. The
    /// directory holding the config file is never used.
    pub fn from_config(config: &Config) -> Self {
        if let Some(name) = &config.service.stack_name {
            return Self::Explicit(name.clone());
        }

        let service = config
            .service
            .name
            .clone()
            .or_else(|| {
                config
                    .project_dir()
                    .and_then(|dir| dir.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "service".to_string());

        Self::Service(service)
    }

    /// Stack name for `stage`
    pub fn stack_name(&self, stage: &str) -> String {
        match self {
            Self::Service(service) => format!("{service}-{stage}"),
            Self::Explicit(name) => name.clone(),
        }
    }
}
