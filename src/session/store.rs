//! Session Persistence
//!
//! The console's analog of browser local storage: a bearer token and the
//! serialized current user. Read at call time, written only by login,
//! logout and session expiry.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::models::User;

/// Persisted token/user pair
pub trait SessionStore: Send + Sync {
    /// Stored bearer token, if any
    fn token(&self) -> Option<String>;

    /// Stored user, if any
    fn user(&self) -> Option<User>;

    /// Persist a fresh session
    fn save(&self, token: &str, user: &User) -> Result<(), SessionError>;

    /// Forget token and user
    fn clear(&self) -> Result<(), SessionError>;
}

/// On-disk session layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<serde_json::Value>,
}

// ============================================
// File-backed store
// ============================================

/// Session persisted as a JSON file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PersistedSession {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return PersistedSession::default(),
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = ?self.path, "Ignoring unreadable session file: {}", e);
            PersistedSession::default()
        })
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.read().token.filter(|t| !t.is_empty())
    }

    fn user(&self) -> Option<User> {
        let value = self.read().user?;
        match serde_json::from_value(value) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Ignoring malformed stored user: {}", e);
                None
            }
        }
    }

    fn save(&self, token: &str, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let session = PersistedSession {
            token: Some(token.to_string()),
            user: Some(serde_json::to_value(user)?),
        };
        std::fs::write(&self.path, serde_json::to_vec_pretty(&session)?)?;

        tracing::debug!(path = ?self.path, "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================
// In-memory store
// ============================================

/// Session kept in process memory
#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<(String, User)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session
    pub fn with_session(token: &str, user: User) -> Self {
        Self {
            inner: RwLock::new(Some((token.to_string(), user))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|(token, _)| token.clone()))
    }

    fn user(&self) -> Option<User> {
        self.inner
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|(_, user)| user.clone()))
    }

    fn save(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *guard = Some((token.to_string(), user.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Errors raised while persisting the session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Lock error: {0}")]
    Lock(String),
}
