//! Client configuration.
//!
//! Supports reading settings from `~/.config/stockin/config.toml`. A
//! missing file is not an error: defaults apply, and the base URL can be
//! overridden with the `STOCKIN_BASE_URL` environment variable.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{Result, StockinError};
use crate::paths::StockinPaths;

/// Default API base URL (the local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 40;

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the StockIn API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration file from the default location, falling back
    /// to defaults when the file doesn't exist, then applies the
    /// `STOCKIN_BASE_URL` environment override.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = StockinPaths::config_file()
            .map_err(|e| StockinError::config(e.to_string()))?;

        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| {
                StockinError::config(format!(
                    "Failed to read configuration file at {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
            Self::from_toml_str(&content)?
        } else {
            Self::default()
        };

        Ok(config.with_base_url_override(std::env::var("STOCKIN_BASE_URL").ok()))
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies an optional base-URL override (e.g., from the environment).
    /// Empty overrides are ignored.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url
            && !url.trim().is_empty()
        {
            self.base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_full_config() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://api.stockin.example"
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://api.stockin.example");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_env_override_wins() {
        let config = ClientConfig::default()
            .with_base_url_override(Some("https://staging.stockin.example".to_string()));
        assert_eq!(config.base_url, "https://staging.stockin.example");
    }

    #[test]
    fn test_empty_override_ignored() {
        let config = ClientConfig::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(ClientConfig::from_toml_str("base_url = [").is_err());
    }
}
