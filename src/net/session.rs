//! Session token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client reads the access token from a store it is handed at
//! construction, writes rotated tokens back after a refresh, and clears the
//! store when the refresh exchange fails. The CLI persists the session to a
//! JSON file; tests and embedders use the in-memory store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::types::CurrentUser;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted client state: two tokens and the cached user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access: String,
    pub refresh: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUser>,
}

impl Session {
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { access: access.into(), refresh: refresh.into(), user: None }
    }

    /// Apply a refresh result. The refresh token is only replaced when the
    /// server rotated it.
    #[must_use]
    pub fn refreshed(mut self, access: String, refresh: Option<String>) -> Self {
        self.access = access;
        if let Some(refresh) = refresh {
            self.refresh = refresh;
        }
        self
    }
}

/// Injectable holder for the current session.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<Session>;

    /// # Errors
    ///
    /// Returns an error if a persistent store fails to write.
    fn set(&self, session: Session) -> Result<(), SessionError>;

    /// # Errors
    ///
    /// Returns an error if a persistent store fails to remove its file.
    fn clear(&self) -> Result<(), SessionError>;

    fn access_token(&self) -> Option<String> {
        self.get().map(|s| s.access)
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { inner: Mutex::new(Some(session)) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Session> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: Session) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Session persisted as JSON, cached in memory after the first read.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cache: Mutex<Option<Session>>,
}

impl FileTokenStore {
    /// Open the store at `path`, loading any session already saved there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let cached = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(serde_json::from_str::<Session>(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, cache: Mutex::new(cached) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<Session> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: Session) -> Result<(), SessionError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a crash never leaves a half-written session.
        let tmp = self.path.with_extension("json.tmp");
        write_private(&tmp, &serde_json::to_vec_pretty(&session)?)?;
        std::fs::rename(&tmp, &self.path)?;
        *cache = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        *cache = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `bytes` to a fresh file readable only by the owner on unix.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
