// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication endpoints.
//!
//! Built directly on the shared `reqwest::Client` rather than the recovering
//! transport: auth endpoints never carry the access token and must not feed
//! back into session recovery.

use crate::error::Result;
use crate::http::{check_json, connectivity_error};
use crate::models::{LoginCredentials, LoginResponse};

#[derive(Clone)]
pub struct AuthService {
    http: reqwest::Client,
    base_url: String,
}

impl AuthService {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `POST /autenticacao/login` with JSON credentials.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        let url = format!("{}/autenticacao/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(connectivity_error)?;
        check_json(response).await
    }

    /// `POST /autenticacao/refresh`. The bearer is the refresh token, not
    /// the access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginResponse> {
        let url = format!("{}/autenticacao/refresh", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(refresh_token)
            .send()
            .await
            .map_err(connectivity_error)?;
        check_json(response).await
    }
}
