// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP transport for the versioned REST endpoints.
//!
//! Attaches the bearer access token, normalizes failures into [`ApiError`]
//! and funnels the first 401 of a request into the recovery coordinator.
//! Auth endpoints never go through this type (see `AuthService`), which is
//! what exempts them from both token attachment and recovery.

use crate::error::{ApiError, Result};
use crate::http::recovery::RecoveryCoordinator;
use crate::http::{check_empty, check_json, connectivity_error};
use crate::models::PhotoUpload;
use crate::session::SessionManager;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Request body variants. JSON is pre-serialized and photo bytes are owned,
/// so the request can be rebuilt for the single post-recovery retry.
enum Payload {
    Empty,
    Json(serde_json::Value),
    Photo(PhotoUpload),
}

#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    recovery: Arc<RecoveryCoordinator>,
}

impl HttpTransport {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<SessionManager>,
        recovery: Arc<RecoveryCoordinator>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
            recovery,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.dispatch(Method::GET, path, query, &Payload::Empty).await?;
        check_json(response).await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let payload = Payload::Json(to_value(body)?);
        let response = self.dispatch(Method::POST, path, &[], &payload).await?;
        check_json(response).await
    }

    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let payload = Payload::Json(to_value(body)?);
        let response = self.dispatch(Method::PUT, path, &[], &payload).await?;
        check_json(response).await
    }

    /// POST with no body and no expected response (link sub-resources).
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let response = self.dispatch(Method::POST, path, &[], &Payload::Empty).await?;
        check_empty(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .dispatch(Method::DELETE, path, &[], &Payload::Empty)
            .await?;
        check_empty(response).await
    }

    /// Multipart photo upload. The form is built by reqwest so the
    /// content-type (with boundary) is always generated, never hand-set.
    pub async fn post_photo<T: DeserializeOwned>(
        &self,
        path: &str,
        upload: &PhotoUpload,
    ) -> Result<T> {
        let payload = Payload::Photo(upload.clone());
        let response = self.dispatch(Method::POST, path, &[], &payload).await?;
        check_json(response).await
    }

    /// Send the request, recovering the session on the first 401.
    ///
    /// A request is retried at most once: a second 401 after a successful
    /// recovery is returned as a hard failure instead of recursing.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: &Payload,
    ) -> Result<reqwest::Response> {
        let mut recovered = false;
        loop {
            let response = self.send_once(method.clone(), path, query, payload).await?;
            if response.status().as_u16() == 401 && !recovered {
                recovered = true;
                tracing::debug!(path, "Received 401, entering session recovery");
                self.recovery.recover().await?;
                continue;
            }
            return Ok(response);
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: &Payload,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        request = match payload {
            Payload::Empty => request,
            Payload::Json(value) => request.json(value),
            Payload::Photo(upload) => request.multipart(build_form(upload)?),
        };

        tracing::debug!(%method, path, "HTTP request");
        let response = request.send().await.map_err(connectivity_error)?;
        tracing::debug!(%method, path, status = response.status().as_u16(), "HTTP response");
        Ok(response)
    }
}

fn to_value(body: &impl Serialize) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn build_form(upload: &PhotoUpload) -> Result<reqwest::multipart::Form> {
    let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|e| ApiError::Decode(format!("invalid content type: {e}")))?;
    Ok(reqwest::multipart::Form::new().part("foto", part))
}
