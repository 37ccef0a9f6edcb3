use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Project-local config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "siterun.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file '{path}' does not exist")]
    NotFound { path: PathBuf },

    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the user-level configuration file.
    ///
    /// Uses `~/.config/siterun/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("siterun").join("config.toml")
    }

    /// Pick the config file to load, if any.
    ///
    /// An explicit path must exist. Otherwise `<project_dir>/siterun.toml`
    /// wins over `user_path`; `None` means built-in defaults.
    pub fn discover(
        explicit: Option<&Path>,
        project_dir: &Path,
        user_path: &Path,
    ) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Ok(Some(path.to_path_buf()));
        }

        let project = project_dir.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Ok(Some(project));
        }
        if user_path.is_file() {
            return Ok(Some(user_path.to_path_buf()));
        }
        Ok(None)
    }

    /// Loads configuration for a run started in `project_dir`.
    pub fn load(explicit: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        match Self::discover(explicit, project_dir, &Self::config_path())? {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Loads, parses and validates a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Preprocessor command and actions are non-empty
    /// - Generator name is non-empty
    /// - Copy extensions are bare (no dot, separator or glob syntax)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pre = &self.preprocessor;
        for (field, value) in [
            ("preprocessor.command", &pre.command),
            ("preprocessor.preprocess_action", &pre.preprocess_action),
            ("preprocessor.watch_action", &pre.watch_action),
            ("generator.name", &self.generator.name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must not be empty", field),
                });
            }
        }

        for ext in &self.assets.copy_file_exts {
            let bad = ext.is_empty()
                || ext
                    .chars()
                    .any(|c| matches!(c, '.' | '/' | '\\' | '*' | '?' | '[' | ']' | '{' | '}'));
            if bad {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "assets.copy_file_exts entry '{}' must be a bare extension like \"png\"",
                        ext
                    ),
                });
            }
        }

        Ok(())
    }
}
