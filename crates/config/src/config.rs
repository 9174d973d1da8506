//! Configuration management
//!
//! This module handles loading stackrun configuration from `stackrun.toml`.
//!
//! ```toml
//! [service]
//! name = "my-app"
//!
//! [deploy]
//! stage = "prod"
//! region = "eu-west-1"
//! profile = "deployer"
//!
//! [sync]
//! localPath = "dist/"
//! delete = true
//!
//! [outputs]
//! bucket = "WebAppS3BucketOutput"
//! domain = "WebAppCloudFrontDistributionOutput"
//! ```

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Service identity section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Service name; the stack name is `<name>-<stage>`
    #[serde(default)]
    pub name: Option<String>,

    /// Explicit stack name, used verbatim instead of `<name>-<stage>`
    #[serde(default, rename = "stackName")]
    pub stack_name: Option<String>,
}

/// Deployment target section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Deployment stage (e.g. "dev", "prod")
    #[serde(default = "default_stage")]
    pub stage: String,

    /// Target region
    #[serde(default = "default_region")]
    pub region: String,

    /// Credential profile passed through to the cloud CLI
    #[serde(default)]
    pub profile: Option<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            stage: default_stage(),
            region: default_region(),
            profile: None,
        }
    }
}

/// Local directory sync section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Local directory uploaded by `syncToS3`
    #[serde(default = "default_local_path", rename = "localPath")]
    pub local_path: PathBuf,

    /// Remove remote objects that no longer exist locally
    #[serde(default)]
    pub delete: bool,

    /// Extra arguments appended to `s3 sync` verbatim
    #[serde(default, rename = "extraArgs")]
    pub extra_args: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_path: default_local_path(),
            delete: false,
            extra_args: Vec::new(),
        }
    }
}

/// Stack output keys section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputsConfig {
    /// Output holding the bucket name
    #[serde(default = "default_bucket_output")]
    pub bucket: String,

    /// Output holding the distribution domain name
    #[serde(default = "default_domain_output")]
    pub domain: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket_output(),
            domain: default_domain_output(),
        }
    }
}

/// Cache invalidation section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationConfig {
    /// Paths passed to `create-invalidation --paths`
    #[serde(default = "default_invalidation_paths")]
    pub paths: Vec<String>,
}

impl Default for InvalidationConfig {
    fn default() -> Self {
        Self {
            paths: default_invalidation_paths(),
        }
    }
}

/// Cloud CLI section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Program to execute (name on `PATH` or absolute path)
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

/// stackrun configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Service identity
    #[serde(default)]
    pub service: ServiceConfig,

    /// Deployment target
    #[serde(default)]
    pub deploy: DeployConfig,

    /// Local directory sync
    #[serde(default)]
    pub sync: SyncConfig,

    /// Stack output keys
    #[serde(default)]
    pub outputs: OutputsConfig,

    /// Cache invalidation
    #[serde(default)]
    pub invalidation: InvalidationConfig,

    /// Cloud CLI
    #[serde(default)]
    pub aws: AwsConfig,

    /// Base directory for resolving relative paths (not serialized)
    #[serde(skip)]
    base_dir: Option<PathBuf>,

    /// Project the configuration applies to (not serialized)
    #[serde(skip)]
    project_dir: Option<PathBuf>,
}

fn default_stage() -> String {
    "dev".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_local_path() -> PathBuf {
    PathBuf::from("app/")
}

fn default_bucket_output() -> String {
    "WebAppS3BucketOutput".to_string()
}

fn default_domain_output() -> String {
    "WebAppCloudFrontDistributionOutput".to_string()
}

fn default_invalidation_paths() -> Vec<String> {
    vec!["/*".to_string()]
}

fn default_program() -> String {
    "aws".to_string()
}

impl Config {
    /// Load configuration from a file
    ///
    /// Relative paths in the file resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or TOML parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            stackrun_core::Error::Message(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            stackrun_core::Error::Message(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        if let Some(parent) = path.parent() {
            let parent = absolute_dir(parent);
            config.resolve_relative_paths(&parent);
            config.project_dir = Some(parent);
        }

        Ok(config)
    }

    /// Load configuration from TOML string
    ///
    /// Relative paths resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing fails
    pub fn from_toml_str(toml_content: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Self = toml::from_str(toml_content).map_err(|e| {
            stackrun_core::Error::Message(format!("Failed to parse config TOML: {e}"))
        })?;

        let base_dir = absolute_dir(base_dir);
        config.resolve_relative_paths(&base_dir);
        config.project_dir = Some(base_dir);

        Ok(config)
    }

    /// Load the discovered configuration, or defaults rooted at `project_dir`
    ///
    /// Resolution order: `explicit` path (must exist), `stackrun.toml` in
    /// `project_dir`, the user-level config file, built-in defaults.
    ///
    /// Whichever file is used, [`Config::project_dir`] is `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn discover(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let project_dir = absolute_dir(project_dir);

        let mut config = if let Some(path) = explicit {
            Self::load(path)?
        } else if let Some(path) = crate::dirs::find_config_file(&project_dir) {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(path)?
        } else {
            tracing::debug!("No config file found, using defaults");
            let mut config = Self::default();
            config.resolve_relative_paths(&project_dir);
            config
        };

        config.project_dir = Some(project_dir);
        Ok(config)
    }

    /// Apply command-line overrides on top of file values
    #[must_use]
    pub fn with_overrides(
        mut self,
        stage: Option<String>,
        region: Option<String>,
        profile: Option<String>,
    ) -> Self {
        if let Some(stage) = stage {
            self.deploy.stage = stage;
        }
        if let Some(region) = region {
            self.deploy.region = region;
        }
        if profile.is_some() {
            self.deploy.profile = profile;
        }
        self
    }

    /// Directory relative paths were resolved against
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Project directory, independent of where the config file lives
    pub fn project_dir(&self) -> Option<&Path> {
        self.project_dir.as_deref()
    }

    /// Resolve relative paths in configuration
    fn resolve_relative_paths(&mut self, base_dir: &Path) {
        self.base_dir = Some(base_dir.to_path_buf());
        self.sync.local_path = Self::resolve_path(&self.sync.local_path, base_dir);
    }

    /// Resolve a single path: expand ~/ and resolve relative paths
    fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();

        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = ::dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~"
            && let Some(home) = ::dirs::home_dir()
        {
            return home;
        }

        if path.is_relative() {
            base_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Make `dir` absolute against the working directory, `""` meaning the working directory
fn absolute_dir(dir: &Path) -> PathBuf {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}
