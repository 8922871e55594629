// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication state and the session bootstrap flow.

use crate::error::{ApiError, Result};
use crate::facade::ApiFacade;
use crate::models::{LoginCredentials, LoginResponse};
use crate::session::SessionManager;
use crate::stores::StateCell;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<ApiError>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            // Callers see "loading" until initialize() has run once.
            is_loading: true,
            error: None,
        }
    }
}

pub struct AuthStore {
    facade: Arc<ApiFacade>,
    session: Arc<SessionManager>,
    credentials: LoginCredentials,
    state: StateCell<AuthState>,
}

impl AuthStore {
    /// `credentials` are the configured auto-login identity used by
    /// `initialize` when no valid session is persisted.
    pub fn new(
        facade: Arc<ApiFacade>,
        session: Arc<SessionManager>,
        credentials: LoginCredentials,
    ) -> Self {
        Self {
            facade,
            session,
            credentials,
            state: StateCell::default(),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_authenticated
    }

    /// Explicit login. Persists the token pair on success and clears any
    /// partial session on failure.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.facade.login(credentials).await {
            Ok(response) => {
                self.session.apply_login(&response)?;
                self.state.set(AuthState {
                    is_authenticated: true,
                    is_loading: false,
                    error: None,
                });
                Ok(response)
            }
            Err(e) => {
                self.session.clear();
                let err = e.clone();
                self.state.set(AuthState {
                    is_authenticated: false,
                    is_loading: false,
                    error: Some(err),
                });
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.session.clear();
        self.state.set(AuthState {
            is_authenticated: false,
            is_loading: false,
            error: None,
        });
    }

    /// Session bootstrap: reuse a persisted, still-valid session or fall
    /// back to auto-login with the configured credentials. Failures are
    /// recorded in state rather than propagated; returns whether a session
    /// is active.
    pub async fn initialize(&self) -> bool {
        self.state.update(|s| s.is_loading = true);

        if self.session.has_valid_session() {
            tracing::debug!("Reusing persisted session");
            self.state.set(AuthState {
                is_authenticated: true,
                is_loading: false,
                error: None,
            });
            return true;
        }

        match self.login(&self.credentials.clone()).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "Automatic login failed");
                false
            }
        }
    }
}
