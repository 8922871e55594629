// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet endpoints under `/v1/pets`.

use crate::error::Result;
use crate::http::HttpTransport;
use crate::models::{CreatePetDto, EntityId, Page, Pet, Photo, PhotoUpload, UpdatePetDto};
use crate::services::list_query;

const BASE: &str = "/v1/pets";

#[derive(Clone)]
pub struct PetService {
    transport: HttpTransport,
}

impl PetService {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// List pets, 0-based page, optional name filter.
    pub async fn list(&self, page: u32, size: u32, nome: Option<&str>) -> Result<Page<Pet>> {
        self.transport
            .get_json(BASE, &list_query(page, size, nome))
            .await
    }

    pub async fn get(&self, id: &EntityId) -> Result<Pet> {
        self.transport.get_json(&format!("{BASE}/{id}"), &[]).await
    }

    pub async fn create(&self, data: &CreatePetDto) -> Result<Pet> {
        self.transport.post_json(BASE, data).await
    }

    pub async fn update(&self, id: &EntityId, data: &UpdatePetDto) -> Result<Pet> {
        self.transport.put_json(&format!("{BASE}/{id}"), data).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.transport.delete(&format!("{BASE}/{id}")).await
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
