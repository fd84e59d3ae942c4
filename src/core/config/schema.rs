//! core::config::schema
//!
//! Settings schema.
//!
//! # Validation
//!
//! Values are validated after parsing: timeouts and concurrency limits must
//! be positive, binary names must not be empty.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User settings.
///
/// # Example
///
/// ```toml
/// registry = "/home/me/.config/statrepos.json"
/// git_binary = "/usr/local/bin/git"
/// fossil_binary = "fossil"
/// probe_timeout_secs = 30
/// max_concurrency = 8
/// color = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Registry file location
    pub registry: Option<PathBuf>,

    /// Git executable (default: "git")
    pub git_binary: Option<String>,

    /// Fossil executable (default: "fossil")
    pub fossil_binary: Option<String>,

    /// Per-probe timeout in seconds (default: none)
    pub probe_timeout_secs: Option<u64>,

    /// Maximum number of probes running at once (default: unbounded)
    pub max_concurrency: Option<usize>,

    /// Colored status labels (default: auto-detect)
    pub color: Option<bool>,
}

impl Settings {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "probe_timeout_secs must be greater than zero".into(),
            ));
        }

        if self.max_concurrency == Some(0) {
            return Err(ConfigError::InvalidValue(
                "max_concurrency must be greater than zero".into(),
            ));
        }

        for (key, binary) in [
            ("git_binary", &self.git_binary),
            ("fossil_binary", &self.fossil_binary),
        ] {
            if binary.as_deref().is_some_and(|b| b.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
            }
        }

        Ok(())
    }
}
