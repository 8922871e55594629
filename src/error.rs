// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types, normalized at the transport boundary.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Field-name to message-list map from server-side validation.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Normalized API client error.
///
/// Every failure that crosses the transport boundary is classified into one
/// of these variants; services and stores never see raw reqwest errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: FieldErrors,
    },

    #[error("server error: {0}")]
    Server(String),

    #[error("connectivity error: {0}")]
    Connectivity(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Server(_) => Some(500),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Validation { .. }
            | ApiError::Connectivity(_)
            | ApiError::Decode(_)
            | ApiError::Storage(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Field-level validation errors, when the server reported them.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    /// Message suitable for user display.
    ///
    /// Field-level errors take precedence over the status-derived message;
    /// unknown statuses fall back to the raw message.
    pub fn user_message(&self) -> String {
        if let Some(errors) = self.field_errors() {
            if let Some(first) = errors.values().next().and_then(|msgs| msgs.first()) {
                return first.clone();
            }
        }

        match self {
            ApiError::Unauthorized(_) => "Session expired. Please sign in again.".to_string(),
            ApiError::Forbidden(_) => "You do not have permission for this action.".to_string(),
            ApiError::NotFound(_) => "Resource not found.".to_string(),
            ApiError::Server(_) => "Internal server error. Try again later.".to_string(),
            ApiError::Connectivity(_) => {
                "Connection error. Check your network and try again.".to_string()
            }
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(message) => message.clone(),
            ApiError::Storage(message) => message.clone(),
        }
    }
}

/// Error body shape returned by the Pet Manager API.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

/// Classify an HTTP failure status plus (possibly empty) body into an error.
pub fn classify_status(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("request failed with status {status}"));

    if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
        return ApiError::Validation { message, errors };
    }

    match status {
        401 => ApiError::Unauthorized(message),
        403 => ApiError::Forbidden(message),
        404 => ApiError::NotFound(message),
        500..=599 => ApiError::Server(message),
        _ => ApiError::Status { status, message },
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
