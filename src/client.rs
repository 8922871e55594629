// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Top-level client wiring: config → session → recovery → transport →
//! services → facade → stores.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::facade::ApiFacade;
use crate::http::{CredentialReauthenticator, HttpTransport, Reauthenticator, RecoveryCoordinator};
use crate::models::LoginCredentials;
use crate::services::{AuthService, PetService, TutorService};
use crate::session::{FileSessionStorage, MemorySessionStorage, SessionManager, SessionStorage};
use crate::stores::{AuthStore, PetStore, TutorStore};
use std::sync::Arc;
use std::time::Duration;

/// Fully wired Pet Manager API client.
pub struct PetManagerClient {
    pub config: Config,
    pub session: Arc<SessionManager>,
    pub recovery: Arc<RecoveryCoordinator>,
    pub facade: Arc<ApiFacade>,
    pub auth_store: AuthStore,
    pub pet_store: PetStore,
    pub tutor_store: TutorStore,
}

impl PetManagerClient {
    /// Build a client with storage chosen from the config (file-backed when
    /// `session_file` is set, in-memory otherwise) and credential-based
    /// reauthentication.
    pub fn new(config: Config) -> Result<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => Arc::new(FileSessionStorage::new(path)),
            None => Arc::new(MemorySessionStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: Config, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        Self::with_parts(config, storage, None)
    }

    /// Full wiring with an optional reauthenticator override (tests inject
    /// failing or stalling implementations here).
    pub fn with_parts(
        config: Config,
        storage: Arc<dyn SessionStorage>,
        reauthenticator: Option<Arc<dyn Reauthenticator>>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.api_timeout_ms))
            .build()
            .map_err(|e| ApiError::Connectivity(e.to_string()))?;

        let session = Arc::new(SessionManager::new(storage)?);
        let auth = AuthService::new(http.clone(), config.api_base_url.clone());

        let credentials = LoginCredentials {
            username: config.username.clone(),
            password: config.password.clone(),
        };
        let reauthenticator = reauthenticator.unwrap_or_else(|| {
            Arc::new(CredentialReauthenticator::new(
                auth.clone(),
                credentials.clone(),
            ))
        });

        let recovery = Arc::new(RecoveryCoordinator::new(
            auth.clone(),
            session.clone(),
            reauthenticator,
            Duration::from_millis(config.reauth_timeout_ms),
        ));

        let transport = HttpTransport::new(
            http,
            config.api_base_url.clone(),
            session.clone(),
            recovery.clone(),
        );

        let facade = Arc::new(ApiFacade::new(
            auth,
            PetService::new(transport.clone()),
            TutorService::new(transport),
        ));

        let auth_store = AuthStore::new(facade.clone(), session.clone(), credentials);
        let pet_store = PetStore::new(facade.clone());
        let tutor_store = TutorStore::new(facade.clone());

        Ok(Self {
            config,
            session,
            recovery,
            facade,
            auth_store,
            pet_store,
            tutor_store,
        })
    }
}
