//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE;
use crate::error::{Result, SetupError};
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SetupError::ConfigError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SetupError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist. Without one, `dsub-e2e.yaml` in the
    /// working directory is used when present, otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            debug!(path = DEFAULT_CONFIG_FILE, "loading config");
            return Self::load(default_path);
        }

        Ok(Self::default())
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SetupError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SetupError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `dsub_command` and `zones` must be non-empty
    /// - `remote_prefix` must be non-empty with no leading or trailing `/`
    /// - disk sizes, when set, must be positive
    pub fn validate(&self) -> Result<()> {
        if self.dsub_command.trim().is_empty() {
            return Err(SetupError::ConfigError(
                "config validation failed: dsub_command must not be empty".to_string(),
            ));
        }

        if self.zones.trim().is_empty() {
            return Err(SetupError::ConfigError(
                "config validation failed: zones must not be empty".to_string(),
            ));
        }

        if self.remote_prefix.is_empty() {
            return Err(SetupError::ConfigError(
                "config validation failed: remote_prefix must not be empty".to_string(),
            ));
        }
        if self.remote_prefix.starts_with('/') || self.remote_prefix.ends_with('/') {
            return Err(SetupError::ConfigError(format!(
                "config validation failed: remote_prefix must not start or end with '/' (found '{}'). Use '{}' instead.",
                self.remote_prefix,
                self.remote_prefix.trim_matches('/')
            )));
        }

        for (field, value) in [
            ("boot_disk_size", self.boot_disk_size),
            ("disk_size", self.disk_size),
        ] {
            if value == Some(0) {
                return Err(SetupError::ConfigError(format!(
                    "config validation failed: {} must be greater than 0",
                    field
                )));
            }
        }

        Ok(())
    }
}
