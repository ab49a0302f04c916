//! Unified path management for StockIn configuration files.
//!
//! All client state (configuration and the stored session) lives under a
//! single per-user config directory, resolved via the `dirs` crate so the
//! location is correct on Linux, macOS, and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for StockIn.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/stockin/           # Config directory (platform equivalent)
/// ├── config.toml              # Client configuration (API base URL etc.)
/// └── session.json             # Stored session (token + identity fields)
/// ```
pub struct StockinPaths;

impl StockinPaths {
    /// Returns the StockIn configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/stockin/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("stockin"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the stored session file.
    ///
    /// # Security Note
    ///
    /// The session file carries the bearer token; it is written with mode
    /// 600 on Unix systems (see `SessionStore::save`).
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = StockinPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("stockin"));
    }

    #[test]
    fn test_config_file() {
        let config_file = StockinPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = StockinPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_session_file() {
        let session_file = StockinPaths::session_file().unwrap();
        assert!(session_file.ends_with("session.json"));
        let config_dir = StockinPaths::config_dir().unwrap();
        assert!(session_file.starts_with(&config_dir));
    }
}
