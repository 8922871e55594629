// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregation layer over the domain services.
//!
//! Adds compound multi-call operations and validates DTOs before mutating
//! requests. Compound failure semantics are part of the contract:
//! create-and-link is deliberately non-atomic (a failed link leaves the
//! created pet in place), while delete-and-unlink aborts the delete when any
//! unlink fails.

use crate::error::{ApiError, FieldErrors, Result};
use crate::models::{
    CreatePetDto, CreateTutorDto, EntityId, LoginCredentials, LoginResponse, Page, Pet, Photo,
    PhotoUpload, Tutor, UpdatePetDto, UpdateTutorDto,
};
use crate::services::{AuthService, PetService, TutorService};
use futures_util::future::try_join_all;
use validator::Validate;

#[derive(Clone)]
pub struct ApiFacade {
    auth: AuthService,
    pets: PetService,
    tutors: TutorService,
}

impl ApiFacade {
    pub fn new(auth: AuthService, pets: PetService, tutors: TutorService) -> Self {
        Self { auth, pets, tutors }
    }

    // ─── Auth ────────────────────────────────────────────────────────────

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        self.auth.login(credentials).await
    }

    // ─── Pets ────────────────────────────────────────────────────────────

    pub async fn list_pets(&self, page: u32, size: u32, nome: Option<&str>) -> Result<Page<Pet>> {
        self.pets.list(page, size, nome).await
    }

    pub async fn get_pet(&self, id: &EntityId) -> Result<Pet> {
        self.pets.get(id).await
    }

    pub async fn create_pet(&self, data: &CreatePetDto) -> Result<Pet> {
        check_valid(data)?;
        self.pets.create(data).await
    }

    pub async fn update_pet(&self, id: &EntityId, data: &UpdatePetDto) -> Result<Pet> {
        check_valid(data)?;
        self.pets.update(id, data).await
    }

    pub async fn delete_pet(&self, id: &EntityId) -> Result<()> {
        self.pets.delete(id).await
    }

    pub async fn upload_pet_photo(&self, id: &EntityId, upload: &PhotoUpload) -> Result<Photo> {
        self.pets.upload_photo(id, upload).await
    }

    pub async fn delete_pet_photo(&self, id: &EntityId, foto_id: &EntityId) -> Result<()> {
        self.pets.delete_photo(id, foto_id).await
    }

    /// Create a pet, then link it to the tutor.
    ///
    /// If the link fails the pet still exists; there is no compensating
    /// delete.
    pub async fn create_pet_and_link_to_tutor(
        &self,
        data: &CreatePetDto,
        tutor_id: &EntityId,
    ) -> Result<Pet> {
        let pet = self.create_pet(data).await?;
        self.tutors.link_pet(tutor_id, &pet.id).await?;
        Ok(pet)
    }

    /// Unlink a pet from every associated tutor (in parallel), then delete
    /// it. Any unlink failure aborts the delete.
    pub async fn delete_pet_and_unlink(&self, id: &EntityId) -> Result<()> {
        let pet = self.pets.get(id).await?;

        if let Some(tutores) = pet.tutores.filter(|t| !t.is_empty()) {
            try_join_all(
                tutores
                    .iter()
                    .map(|tutor| self.tutors.unlink_pet(&tutor.id, id)),
            )
            .await?;
        }

        self.pets.delete(id).await
    }

    /// Pet with the tutor relation always materialized (empty when the
    /// server did not expand it).
    pub async fn get_pet_with_tutors(&self, id: &EntityId) -> Result<Pet> {
        let mut pet = self.pets.get(id).await?;
        if pet.tutores.is_none() {
            pet.tutores = Some(Vec::new());
        }
        Ok(pet)
    }

    // ─── Tutors ──────────────────────────────────────────────────────────

    pub async fn list_tutors(
        &self,
        page: u32,
        size: u32,
        nome: Option<&str>,
    ) -> Result<Page<Tutor>> {
        self.tutors.list(page, size, nome).await
    }

    pub async fn get_tutor(&self, id: &EntityId) -> Result<Tutor> {
        self.tutors.get(id).await
    }

    pub async fn create_tutor(&self, data: &CreateTutorDto) -> Result<Tutor> {
        check_valid(data)?;
        self.tutors.create(data).await
    }

    pub async fn update_tutor(&self, id: &EntityId, data: &UpdateTutorDto) -> Result<Tutor> {
        check_valid(data)?;
        self.tutors.update(id, data).await
    }

    pub async fn delete_tutor(&self, id: &EntityId) -> Result<()> {
        self.tutors.delete(id).await
    }

    pub async fn link_pet(&self, tutor_id: &EntityId, pet_id: &EntityId) -> Result<()> {
        self.tutors.link_pet(tutor_id, pet_id).await
    }

    pub async fn unlink_pet(&self, tutor_id: &EntityId, pet_id: &EntityId) -> Result<()> {
        self.tutors.unlink_pet(tutor_id, pet_id).await
    }

    pub async fn upload_tutor_photo(&self, id: &EntityId, upload: &PhotoUpload) -> Result<Photo> {
        self.tutors.upload_photo(id, upload).await
    }

    pub async fn delete_tutor_photo(&self, id: &EntityId, foto_id: &EntityId) -> Result<()> {
        self.tutors.delete_photo(id, foto_id).await
    }

    /// Create a tutor and link the given pets in parallel. Like
    /// create-and-link, a failed link does not roll back the created tutor.
    pub async fn create_tutor_with_pets(
        &self,
        data: &CreateTutorDto,
        pet_ids: &[EntityId],
    ) -> Result<Tutor> {
        let tutor = self.create_tutor(data).await?;

        if !pet_ids.is_empty() {
            try_join_all(
                pet_ids
                    .iter()
                    .map(|pet_id| self.tutors.link_pet(&tutor.id, pet_id)),
            )
            .await?;
        }

        Ok(tutor)
    }

    /// Remove every pet link from a tutor (in parallel).
    pub async fn unlink_all_pets(&self, id: &EntityId) -> Result<()> {
        let tutor = self.tutors.get(id).await?;

        if let Some(pets) = tutor.pets.filter(|p| !p.is_empty()) {
            try_join_all(pets.iter().map(|pet| self.tutors.unlink_pet(id, &pet.id))).await?;
        }

        Ok(())
    }

    /// Tutor with the pet relation always materialized.
    pub async fn get_tutor_with_pets(&self, id: &EntityId) -> Result<Tutor> {
        let mut tutor = self.tutors.get(id).await?;
        if tutor.pets.is_none() {
            tutor.pets = Some(Vec::new());
        }
        Ok(tutor)
    }
}

/// Run DTO validation and surface failures in the normalized error shape.
fn check_valid(dto: &impl Validate) -> Result<()> {
    dto.validate().map_err(|errors| {
        let mut map = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            map.insert(field.to_string(), messages);
        }
        ApiError::Validation {
            message: "validation failed".to_string(),
            errors: map,
        }
    })
}
