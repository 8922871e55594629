// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value persistence for the session token pair.
//!
//! Pure get/set with no logic; any reader must tolerate the complete absence
//! of a stored session (treated as logged out).

use crate::error::{ApiError, Result};
use crate::session::Session;
use std::path::PathBuf;
use std::sync::Mutex;

/// Persistence backend for the session record.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStorage {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.inner.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.inner.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ApiError {
    ApiError::Storage("session storage lock poisoned".to_string())
}

/// File-backed storage: one JSON record holding the token pair and expiry.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Storage(e.to_string())),
        };
        // A corrupt record is treated as logged out rather than fatal.
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Discarding unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session).map_err(|e| ApiError::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| ApiError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(e.to_string())),
        }
    }
}
