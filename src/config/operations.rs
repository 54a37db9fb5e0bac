//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{Result, SyncError};
use std::path::Path;

/// Name of the config file at the repository root.
pub const CONFIG_FILE_NAME: &str = ".mrsync.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SyncError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// A present-but-malformed file is still an error: silently ignoring
    /// a broken config would post to the wrong place.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SyncError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `gitlab_url` must be an http(s) URL
    /// - `project`, when set, must be non-empty
    /// - `token_env` must be non-empty
    /// - `api_timeout_secs` must be positive
    pub fn validate(&self) -> Result<()> {
        if !self.gitlab_url.starts_with("http://") && !self.gitlab_url.starts_with("https://") {
            return Err(SyncError::UserError(format!(
                "config validation failed: gitlab_url must start with http:// or https://, got '{}'",
                self.gitlab_url
            )));
        }

        if let Some(project) = &self.project {
            if project.trim().is_empty() {
                return Err(SyncError::UserError(
                    "config validation failed: project must be non-empty when set".to_string(),
                ));
            }
        }

        if self.token_env.trim().is_empty() {
            return Err(SyncError::UserError(
                "config validation failed: token_env must be non-empty".to_string(),
            ));
        }

        if self.api_timeout_secs == 0 {
            return Err(SyncError::UserError(
                "config validation failed: api_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
