// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet records and DTOs. Field names follow the backend API (Portuguese).

use crate::models::photo::Photo;
use crate::models::tutor::Tutor;
use crate::models::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A pet record as returned by the API.
///
/// `tutores` is loaded lazily by the server and may be absent entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: EntityId,
    pub nome: String,
    pub raca: String,
    pub idade: u32,
    #[serde(default)]
    pub foto: Option<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutores: Option<Vec<Tutor>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePetDto {
    #[validate(length(min = 2, max = 100, message = "nome must have 2 to 100 characters"))]
    pub nome: String,
    #[validate(length(min = 2, max = 100, message = "raca must have 2 to 100 characters"))]
    pub raca: String,
    #[validate(range(max = 100, message = "idade must be between 0 and 100"))]
    pub idade: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePetDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "nome must have 2 to 100 characters"))]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "raca must have 2 to 100 characters"))]
    pub raca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 100, message = "idade must be between 0 and 100"))]
    pub idade: Option<u32>,
}
