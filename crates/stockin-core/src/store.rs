//! Session persistence.
//!
//! The token and cached identity fields live in a single JSON file under
//! the config directory. Clearing the store removes the token and both
//! identity fields at once.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::StockinPaths;
use crate::session::Session;

const SESSION_FILE: &str = "session.json";

/// Manages session persistence to the filesystem.
///
/// `SessionStore` handles reading and writing the stored session as a JSON
/// file. The session is read on every outgoing request, created on
/// successful login/signup, and deleted on logout or when the server
/// rejects the credential.
#[derive(Debug, Clone)]
pub struct SessionStore {
    base_dir: PathBuf,
}

impl SessionStore {
    /// Creates a new `SessionStore` rooted at the specified directory.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).context("Failed to create session store directory")?;
        Ok(Self { base_dir })
    }

    /// Creates a `SessionStore` at the default location
    /// (`~/.config/stockin/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or
    /// created.
    pub fn default_location() -> Result<Self> {
        let base_dir = StockinPaths::config_dir()
            .context("Failed to resolve config directory")?;
        Self::new(base_dir)
    }

    /// Saves a session to disk.
    ///
    /// The file is written with mode 600 on Unix systems since it carries
    /// the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or if the file cannot be
    /// written.
    pub fn save(&self, session: &Session) -> Result<()> {
        let file_path = self.session_file_path();
        let json =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        fs::write(&file_path, json)
            .context(format!("Failed to write session file: {:?}", file_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&file_path, permissions)
                .context("Failed to set session file permissions")?;
        }

        Ok(())
    }

    /// Loads the stored session, if any.
    ///
    /// # Returns
    ///
    /// `Some(session)` if a session file exists, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid JSON.
    pub fn load(&self) -> Result<Option<Session>> {
        let file_path = self.session_file_path();

        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path)
            .context(format!("Failed to read session file: {:?}", file_path))?;

        let session: Session =
            serde_json::from_str(&json).context("Failed to deserialize session")?;

        Ok(Some(session))
    }

    /// Returns the stored bearer token, filtering out empty strings.
    ///
    /// A request is considered authenticated if and only if this returns
    /// `Some`.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .load()?
            .map(|session| session.access_token)
            .filter(|token| !token.trim().is_empty()))
    }

    /// Deletes the stored session.
    ///
    /// Removing the file clears the token and both cached identity fields
    /// in one step. Clearing an already-empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be deleted.
    pub fn clear(&self) -> Result<()> {
        let file_path = self.session_file_path();

        if file_path.exists() {
            fs::remove_file(&file_path)
                .context(format!("Failed to delete session file: {:?}", file_path))?;
        }

        Ok(())
    }

    /// Returns true if a usable (non-empty) token is currently stored.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    fn session_file_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }
}
