// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP plumbing: transport, session recovery, and shared response handling.

pub mod recovery;
pub mod transport;

pub use recovery::{
    CredentialReauthenticator, Reauthenticator, RecoveryCoordinator, SessionEvent,
};
pub use transport::HttpTransport;

use crate::error::{classify_status, ApiError, Result};
use serde::de::DeserializeOwned;

/// Map a reqwest send failure (no response received) to the normalized error.
pub(crate) fn connectivity_error(err: reqwest::Error) -> ApiError {
    ApiError::Connectivity(err.to_string())
}

/// Check status and decode a JSON body.
pub(crate) async fn check_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Check status, discarding any successful body.
pub(crate) async fn check_empty(response: reqwest::Response) -> Result<()> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status.as_u16(), &body))
}
