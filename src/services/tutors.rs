// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tutor endpoints under `/v1/tutores`, including the pet link sub-resource.

use crate::error::Result;
use crate::http::HttpTransport;
use crate::models::{CreateTutorDto, EntityId, Page, Photo, PhotoUpload, Tutor, UpdateTutorDto};
use crate::services::list_query;

const BASE: &str = "/v1/tutores";

#[derive(Clone)]
pub struct TutorService {
    transport: HttpTransport,
}

impl TutorService {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self, page: u32, size: u32, nome: Option<&str>) -> Result<Page<Tutor>> {
        self.transport
            .get_json(BASE, &list_query(page, size, nome))
            .await
    }

    pub async fn get(&self, id: &EntityId) -> Result<Tutor> {
        self.transport.get_json(&format!("{BASE}/{id}"), &[]).await
    }

    pub async fn create(&self, data: &CreateTutorDto) -> Result<Tutor> {
        self.transport.post_json(BASE, data).await
    }

    pub async fn update(&self, id: &EntityId, data: &UpdateTutorDto) -> Result<Tutor> {
        self.transport.put_json(&format!("{BASE}/{id}"), data).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.transport.delete(&format!("{BASE}/{id}")).await
    }

    /// Attach a pet to a tutor (many-to-many link).
    pub async fn link_pet(&self, tutor_id: &EntityId, pet_id: &EntityId) -> Result<()> {
        self.transport
            .post_empty(&format!("{BASE}/{tutor_id}/pets/{pet_id}"))
            .await
    }

    pub async fn unlink_pet(&self, tutor_id: &EntityId, pet_id: &EntityId) -> Result<()> {
        self.transport
            .delete(&format!("{BASE}/{tutor_id}/pets/{pet_id}"))
            .await
    }

    pub async fn upload_photo(&self, id: &EntityId, upload: &PhotoUpload) -> Result<Photo> {
        self.transport
            .post_photo(&format!("{BASE}/{id}/fotos"), upload)
            .await
    }

    pub async fn delete_photo(&self, id: &EntityId, foto_id: &EntityId) -> Result<()> {
        self.transport
            .delete(&format!("{BASE}/{id}/fotos/{foto_id}"))
            .await
    }
}
