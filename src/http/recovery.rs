// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session recovery: refresh-then-reauthenticate with queued-request replay.
//!
//! A 401 on a non-auth endpoint lands here. The first caller becomes the
//! recovery leader; everyone else parks on a FIFO queue and observes the
//! leader's outcome. At most one refresh or reauthentication is in flight at
//! any time, and the refresh→reauth escalation happens at most once per
//! triggering request.

use crate::error::{ApiError, Result};
use crate::models::{LoginCredentials, LoginResponse};
use crate::services::AuthService;
use crate::session::{Session, SessionManager};
use futures_util::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};

/// Session lifecycle notifications for collaborators that care about token
/// renewal (replaces the original broadcast-event signaling).
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Silent refresh succeeded; carries the renewed session.
    Refreshed(Session),
    /// Full reauthentication succeeded; carries the new session.
    Reauthenticated(Session),
    /// Refresh was impossible or failed; reauthentication is starting.
    Unauthorized,
    /// Recovery failed terminally and the local session was cleared.
    Cleared,
}

/// Fallback credential flow invoked when refresh is unavailable or fails.
pub trait Reauthenticator: Send + Sync {
    fn reauthenticate(&self) -> BoxFuture<'_, Result<LoginResponse>>;
}

/// Default reauthenticator: full login with configured credentials.
pub struct CredentialReauthenticator {
    auth: AuthService,
    credentials: LoginCredentials,
}

impl CredentialReauthenticator {
    pub fn new(auth: AuthService, credentials: LoginCredentials) -> Self {
        Self { auth, credentials }
    }
}

impl Reauthenticator for CredentialReauthenticator {
    fn reauthenticate(&self) -> BoxFuture<'_, Result<LoginResponse>> {
        Box::pin(async move { self.auth.login(&self.credentials).await })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecoveryState {
    Idle,
    Refreshing,
    Reauthenticating,
}

struct Inner {
    state: RecoveryState,
    waiters: VecDeque<oneshot::Sender<Result<String>>>,
}

/// Serializes session recovery and replays queued continuations.
pub struct RecoveryCoordinator {
    auth: AuthService,
    session: Arc<SessionManager>,
    reauthenticator: Arc<dyn Reauthenticator>,
    reauth_timeout: Duration,
    inner: Mutex<Inner>,
    events: broadcast::Sender<SessionEvent>,
}

impl RecoveryCoordinator {
    pub fn new(
        auth: AuthService,
        session: Arc<SessionManager>,
        reauthenticator: Arc<dyn Reauthenticator>,
        reauth_timeout: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            auth,
            session,
            reauthenticator,
            reauth_timeout,
            inner: Mutex::new(Inner {
                state: RecoveryState::Idle,
                waiters: VecDeque::new(),
            }),
            events,
        }
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Recover from a 401: returns a fresh access token to retry with, or
    /// the terminal error of the recovery attempt.
    ///
    /// If a recovery is already in flight the caller is queued and resolved
    /// in FIFO order with the shared outcome.
    pub async fn recover(&self) -> Result<String> {
        let waiter = {
            let mut inner = self.lock_inner();
            match inner.state {
                RecoveryState::Idle => {
                    inner.state = if self.session.refresh_token().is_some() {
                        RecoveryState::Refreshing
                    } else {
                        RecoveryState::Reauthenticating
                    };
                    None
                }
                RecoveryState::Refreshing | RecoveryState::Reauthenticating => {
                    let (tx, rx) = oneshot::channel();
                    inner.waiters.push_back(tx);
                    Some(rx)
                }
            }
        };

        if let Some(rx) = waiter {
            return match rx.await {
                Ok(outcome) => outcome,
                Err(_) => Err(ApiError::Unauthorized("session recovery abandoned".to_string())),
            };
        }

        let outcome = self.run_recovery().await;
        self.settle(&outcome);
        outcome
    }

    async fn run_recovery(&self) -> Result<String> {
        if let Some(refresh_token) = self.session.refresh_token() {
            tracing::info!("Access token rejected, attempting silent refresh");
            match self.auth.refresh(&refresh_token).await {
                Ok(response) => {
                    let session = self.session.apply_login(&response)?;
                    tracing::info!("Token refresh succeeded");
                    let _ = self.events.send(SessionEvent::Refreshed(session.clone()));
                    return Ok(session.access_token);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Token refresh failed, escalating to reauthentication");
                    self.set_state(RecoveryState::Reauthenticating);
                }
            }
        } else {
            tracing::info!("No refresh token present, reauthenticating directly");
        }

        let _ = self.events.send(SessionEvent::Unauthorized);

        match tokio::time::timeout(self.reauth_timeout, self.reauthenticator.reauthenticate()).await
        {
            Ok(Ok(response)) => {
                let session = self.session.apply_login(&response)?;
                tracing::info!("Reauthentication succeeded");
                let _ = self
                    .events
                    .send(SessionEvent::Reauthenticated(session.clone()));
                Ok(session.access_token)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Reauthentication failed, clearing session");
                self.session.clear();
                let _ = self.events.send(SessionEvent::Cleared);
                Err(e)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.reauth_timeout.as_millis() as u64,
                    "Reauthentication timed out, clearing session"
                );
                self.session.clear();
                let _ = self.events.send(SessionEvent::Cleared);
                Err(ApiError::Unauthorized(
                    "reauthentication timed out".to_string(),
                ))
            }
        }
    }

    /// Drain the waiter queue in FIFO order with the shared outcome and
    /// return to `Idle`.
    fn settle(&self, outcome: &Result<String>) {
        let waiters = {
            let mut inner = self.lock_inner();
            inner.state = RecoveryState::Idle;
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }

    fn set_state(&self, state: RecoveryState) {
        self.lock_inner().state = state;
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Waiter bookkeeping only; a poisoned lock would mean a panic while
        // holding it, which none of the critical sections can do.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
