// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Domain models and DTOs for the Pet Manager API.

pub mod auth;
pub mod id;
pub mod page;
pub mod pet;
pub mod photo;
pub mod tutor;

pub use auth::{LoginCredentials, LoginResponse};
pub use id::EntityId;
pub use page::Page;
pub use pet::{CreatePetDto, Pet, UpdatePetDto};
pub use photo::{Photo, PhotoUpload};
pub use tutor::{CreateTutorDto, Tutor, UpdateTutorDto};
