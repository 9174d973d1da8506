//! XDG directory utilities
//!
//! stackrun reads a project-local `stackrun.toml` first; the user-level file
//! lives under the XDG config home:
//! - `XDG_CONFIG_HOME` defaults to ~/.config

use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// File name of the project-local configuration
pub const PROJECT_CONFIG_FILE: &str = "stackrun.toml";

/// Get the stackrun config directory
///
/// Returns `$XDG_CONFIG_HOME/stackrun` or `~/.config/stackrun`
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    BaseDirectories::with_prefix("stackrun").get_config_home()
}

/// Get the default user-level config file path
///
/// Returns `$XDG_CONFIG_HOME/stackrun/config.toml` or `~/.config/stackrun/config.toml`
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Find the configuration file to load
///
/// Looks for `stackrun.toml` in `project_dir`, then the user-level file.
/// Returns `None` when neither exists.
#[must_use]
pub fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    let project_file = project_dir.join(PROJECT_CONFIG_FILE);
    if project_file.is_file() {
        return Some(project_file);
    }

    default_config_file().filter(|path| path.is_file())
}
