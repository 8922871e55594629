// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tutor (owner) records and DTOs.

use crate::models::pet::Pet;
use crate::models::photo::Photo;
use crate::models::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A tutor record as returned by the API.
///
/// `pets` mirrors `Pet::tutores`: lazily loaded, absent unless the server
/// expanded the relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
    pub id: EntityId,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub endereco: String,
    pub cpf: String,
    #[serde(default)]
    pub foto: Option<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pets: Option<Vec<Pet>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTutorDto {
    #[validate(length(min = 2, max = 100, message = "nome must have 2 to 100 characters"))]
    pub nome: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 8, max = 20, message = "telefone must have 8 to 20 characters"))]
    pub telefone: String,
    #[validate(length(min = 5, max = 200, message = "endereco must have 5 to 200 characters"))]
    pub endereco: String,
    #[validate(length(min = 11, max = 14, message = "cpf must have 11 to 14 characters"))]
    pub cpf: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTutorDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "nome must have 2 to 100 characters"))]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "email is invalid"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 20, message = "telefone must have 8 to 20 characters"))]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 200, message = "endereco must have 5 to 200 characters"))]
    pub endereco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 11, max = 14, message = "cpf must have 11 to 14 characters"))]
    pub cpf: Option<String>,
}
