// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state and durable token persistence.

pub mod manager;
pub mod storage;

pub use manager::SessionManager;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};

use serde::{Deserialize, Serialize};

/// Authenticated session: token pair plus access-token expiry.
///
/// If `access_token` is present the expiry is always present too, derived
/// from the last successful login or refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at_epoch_ms: i64,
}

impl Session {
    /// Whether the access token is still valid at `now_epoch_ms`.
    pub fn is_valid_at(&self, now_epoch_ms: i64) -> bool {
        now_epoch_ms < self.expires_at_epoch_ms
    }
}
