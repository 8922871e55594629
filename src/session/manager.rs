// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Explicit session owner, injected into the transport and the recovery
//! coordinator.
//!
//! All writers (login, refresh, reauthentication, logout) go through this
//! type, which keeps the in-memory view and the durable storage in step.

use crate::error::Result;
use crate::models::LoginResponse;
use crate::session::{Session, SessionStorage};
use std::sync::{Arc, RwLock};

/// Owns the current session and its persistence.
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    /// Create a manager and restore any persisted session.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let restored = storage.load()?;
        if restored.is_some() {
            tracing::debug!("Restored persisted session");
        }
        Ok(Self {
            storage,
            current: RwLock::new(restored),
        })
    }

    /// Current session snapshot, if logged in.
    pub fn session(&self) -> Option<Session> {
        self.current.read().ok().and_then(|s| s.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.session().map(|s| s.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.session().map(|s| s.refresh_token)
    }

    /// Whether a session exists and its access token has not expired.
    pub fn has_valid_session(&self) -> bool {
        self.session()
            .map(|s| s.is_valid_at(chrono::Utc::now().timestamp_millis()))
            .unwrap_or(false)
    }

    /// Persist the token pair from a successful login or refresh.
    ///
    /// The expiry is computed from `expires_in` at the moment the response
    /// is applied.
    pub fn apply_login(&self, response: &LoginResponse) -> Result<Session> {
        let expires_at_epoch_ms =
            chrono::Utc::now().timestamp_millis() + (response.expires_in as i64) * 1000;
        let session = Session {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone(),
            expires_at_epoch_ms,
        };
        self.storage.save(&session)?;
        if let Ok(mut current) = self.current.write() {
            *current = Some(session.clone());
        }
        tracing::debug!(expires_at = expires_at_epoch_ms, "Session tokens updated");
        Ok(session)
    }

    /// Drop the session from memory and storage.
    pub fn clear(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        if let Ok(mut current) = self.current.write() {
            *current = None;
        }
    }
}
