// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::models::EntityId;
use serde::{Deserialize, Serialize};

/// Photo attached to a pet or tutor. Owned by exactly one record at a time;
/// replaced wholesale on upload and set to `None` on delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: EntityId,
    pub nome: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub url: String,
}

/// Photo payload for multipart upload.
///
/// Owns its bytes so a request replayed after session recovery can rebuild
/// the multipart form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}
