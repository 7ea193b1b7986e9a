//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use studymate_core::error::StorageError;
use studymate_core::{BaseUrl, TokenPair, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
///
/// The backend base URL is remembered alongside the tokens so follow-up
/// commands don't need it repeated.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    api: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Get the session file path.
pub fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "studymate").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// File-backed token store for the CLI.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store at the standard user data location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(session_path()?))
    }

    /// Remember the backend base URL alongside the tokens.
    pub fn remember_api(&self, base: &BaseUrl) -> Result<(), StorageError> {
        let mut session = self.load()?;
        session.api = Some(base.as_str().to_string());
        self.persist(&session)
    }

    /// The backend base URL from the last login, if any.
    pub fn stored_api(&self) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.api)
    }

    fn load(&self) -> Result<StoredSession, StorageError> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::new(format!("failed to read session file: {e}")))?;
        serde_json::from_str(&json)
            .map_err(|e| StorageError::new(format!("invalid session file: {e}")))
    }

    fn persist(&self, session: &StoredSession) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| StorageError::new(format!("failed to encode session: {e}")))?;

        fs::write(&self.path, &json)
            .map_err(|e| StorageError::new(format!("failed to write session file: {e}")))?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms)
                .map_err(|e| StorageError::new(format!("failed to set permissions: {e}")))?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, tokens: &TokenPair) -> studymate_core::Result<()> {
        let mut session = self.load()?;
        session.access_token = Some(tokens.access.as_str().to_string());
        session.refresh_token = Some(tokens.refresh.as_str().to_string());
        self.persist(&session)?;
        Ok(())
    }

    fn read(&self) -> studymate_core::Result<Option<TokenPair>> {
        let session = self.load()?;

        // Both entries must be present to count as a stored pair
        match (session.access_token, session.refresh_token) {
            (Some(access), Some(refresh)) => Ok(Some(TokenPair::new(access, refresh))),
            _ => Ok(None),
        }
    }

    fn clear(&self) -> studymate_core::Result<()> {
        // An unreadable file still clears: fall back to an empty session
        let mut session = self.load().unwrap_or_default();
        session.access_token = None;
        session.refresh_token = None;
        self.persist(&session)?;
        Ok(())
    }
}
