//! core::paths
//!
//! Centralized path routing for statrepos storage locations.
//!
//! # Storage Layout
//!
//! - `~/statrepos.json` - Registry of monitored repositories (default)
//! - `~/.statrepos/config.toml` - Optional settings file (canonical)
//!
//! # Registry Location Precedence
//!
//! 1. `--registry <FILE>` flag
//! 2. `$STATREPOS_REGISTRY`
//! 3. `registry` key in the settings file
//! 4. `~/statrepos.json`

use std::path::{Component, Path, PathBuf};

use super::config::ConfigError;

/// Environment variable overriding the registry location.
pub const REGISTRY_ENV: &str = "STATREPOS_REGISTRY";

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "STATREPOS_CONFIG";

/// File name of the default registry, placed in the home directory.
pub const REGISTRY_FILE_NAME: &str = "statrepos.json";

/// Marker that identifies a Git working copy.
pub const GIT_MARKER: &str = ".git";

/// Marker that identifies a Fossil checkout.
pub const FOSSIL_MARKER: &str = ".fslckout";

/// Default registry path: `~/statrepos.json`.
pub fn default_registry_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(REGISTRY_FILE_NAME))
}

/// Canonical settings path: `~/.statrepos/config.toml`.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".statrepos/config.toml"))
}

/// Join a marker file name onto a repository path.
///
/// `Path::join` inserts exactly one separator, so `"repo"` and `"repo/"`
/// both yield `"repo/.git"`.
pub fn marker_path(repo: &Path, marker: &str) -> PathBuf {
    repo.join(marker)
}

/// Resolve a user-supplied directory against `cwd` when it is relative.
///
/// The result is normalized lexically: `.` components are dropped and `..`
/// removes the preceding component. Symlinks are not resolved.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
