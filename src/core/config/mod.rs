//! core::config
//!
//! Settings schema and loading.
//!
//! # Settings File Locations
//!
//! Searched in order:
//! 1. `$STATREPOS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/statrepos/config.toml`
//! 3. `~/.statrepos/config.toml` (canonical)
//!
//! A missing settings file is not an error; defaults are used. A
//! `$STATREPOS_CONFIG` that names a missing file is skipped with a warning.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Settings file
//! 3. Environment (`$STATREPOS_REGISTRY`)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use statrepos::core::config::Config;
//!
//! let config = Config::load().unwrap().config;
//! println!("git: {}", config.git_binary());
//! println!("registry: {}", config.registry_path(None).unwrap().display());
//! ```

pub mod schema;

pub use schema::Settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use super::paths;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Effective configuration.
///
/// Accessor methods apply defaults and environment overrides.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings file (defaults when absent)
    pub settings: Settings,
    /// Value of `$STATREPOS_REGISTRY` at load time
    registry_env: Option<PathBuf>,
    /// Path to the settings file (if loaded)
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment and default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read,
    /// parsed, or validated.
    pub fn load() -> Result<ConfigLoadResult, ConfigError> {
        Self::load_with_env(|key| std::env::var_os(key).map(PathBuf::from))
    }

    /// Load configuration using `env` to look up environment variables.
    pub fn load_with_env(
        env: impl Fn(&str) -> Option<PathBuf>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let (settings, loaded_from) = match Self::find_settings_file(&env, &mut warnings) {
            Some(path) => (Self::read_settings(&path)?, Some(path)),
            None => (Settings::default(), None),
        };

        settings.validate()?;

        Ok(ConfigLoadResult {
            config: Config {
                settings,
                registry_env: env(paths::REGISTRY_ENV).filter(|p| !p.as_os_str().is_empty()),
                loaded_from,
            },
            warnings,
        })
    }

    /// Locate the first existing settings file.
    fn find_settings_file(
        env: &impl Fn(&str) -> Option<PathBuf>,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Option<PathBuf> {
        // 1. Check $STATREPOS_CONFIG
        if let Some(path) = env(paths::CONFIG_ENV).filter(|p| !p.as_os_str().is_empty()) {
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: format!(
                    "${} names a settings file that does not exist; ignoring it",
                    paths::CONFIG_ENV
                ),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/statrepos/config.toml
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            let path = xdg_home.join("statrepos/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.statrepos/config.toml
        paths::settings_path().ok().filter(|path| path.exists())
    }

    /// Read and parse a settings file.
    pub fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Resolve the registry file location.
    ///
    /// `flag` is the `--registry` CLI value, which wins over everything else.
    pub fn registry_path(&self, flag: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.registry_env {
            return Ok(path.clone());
        }
        if let Some(path) = &self.settings.registry {
            return Ok(path.clone());
        }
        paths::default_registry_path()
    }

    /// Git executable. Defaults to "git".
    pub fn git_binary(&self) -> &str {
        self.settings.git_binary.as_deref().unwrap_or("git")
    }

    /// Fossil executable. Defaults to "fossil".
    pub fn fossil_binary(&self) -> &str {
        self.settings.fossil_binary.as_deref().unwrap_or("fossil")
    }

    /// Per-probe timeout. `None` means probes run to completion.
    pub fn probe_timeout(&self) -> Option<Duration> {
        self.settings.probe_timeout_secs.map(Duration::from_secs)
    }

    /// Concurrency bound. `None` means one probe per repository at once.
    pub fn max_concurrency(&self) -> Option<usize> {
        self.settings.max_concurrency
    }

    /// Explicit color preference, if any.
    pub fn color(&self) -> Option<bool> {
        self.settings.color
    }

    /// Get the path to the loaded settings file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(vars: &[(&str, &Path)]) -> impl Fn(&str) -> Option<PathBuf> {
        let map: HashMap<String, PathBuf> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_path_buf()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn load_from_config_env() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
            git_binary = "/opt/git/bin/git"
            probe_timeout_secs = 10
            "#,
        )
        .unwrap();

        let result = Config::load_with_env(env_from(&[(paths::CONFIG_ENV, &config_path)])).unwrap();
        let config = result.config;

        assert_eq!(config.git_binary(), "/opt/git/bin/git");
        assert_eq!(config.fossil_binary(), "fossil");
        assert_eq!(config.probe_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn load_from_xdg() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("statrepos");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "max_concurrency = 2").unwrap();

        let result = Config::load_with_env(env_from(&[("XDG_CONFIG_HOME", temp.path())])).unwrap();

        assert_eq!(result.config.max_concurrency(), Some(2));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_config_env_file_warns_and_falls_through() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let dir = temp.path().join("statrepos");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "git_binary = \"/usr/local/bin/git\"").unwrap();

        let result = Config::load_with_env(env_from(&[
            (paths::CONFIG_ENV, &missing),
            ("XDG_CONFIG_HOME", temp.path()),
        ]))
        .unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, missing);
        assert!(result.warnings[0].message.contains("STATREPOS_CONFIG"));
        assert_eq!(result.config.git_binary(), "/usr/local/bin/git");
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "unknown_field = true").unwrap();

        let result = Config::load_with_env(env_from(&[(paths::CONFIG_ENV, &config_path)]));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "probe_timeout_secs = 0").unwrap();

        let result = Config::load_with_env(env_from(&[(paths::CONFIG_ENV, &config_path)]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn registry_precedence() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "registry = \"/from/settings.json\"").unwrap();
        let env_registry = PathBuf::from("/from/env.json");

        let settings_only =
            Config::load_with_env(env_from(&[(paths::CONFIG_ENV, &config_path)])).unwrap();
        assert_eq!(
            settings_only.config.registry_path(None).unwrap(),
            PathBuf::from("/from/settings.json")
        );

        let with_env = Config::load_with_env(env_from(&[
            (paths::CONFIG_ENV, &config_path),
            (paths::REGISTRY_ENV, &env_registry),
        ]))
        .unwrap();
        assert_eq!(with_env.config.registry_path(None).unwrap(), env_registry);

        // Flag beats everything
        let flag = PathBuf::from("/from/flag.json");
        assert_eq!(with_env.config.registry_path(Some(&flag)).unwrap(), flag);
    }

    #[test]
    fn defaults_without_settings_file() {
        let config = Config::default();
        assert_eq!(config.git_binary(), "git");
        assert_eq!(config.fossil_binary(), "fossil");
        assert!(config.probe_timeout().is_none());
        assert!(config.max_concurrency().is_none());
        assert!(config.color().is_none());
    }
}
