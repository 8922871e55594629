// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tutor store: mirrors the pet store slices and adds link management.

use crate::error::Result;
use crate::facade::ApiFacade;
use crate::models::{CreateTutorDto, EntityId, Page, Photo, PhotoUpload, Tutor, UpdateTutorDto};
use crate::stores::{ListState, LoadSeq, StateCell, StoreState, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use tokio::sync::watch;

pub struct TutorStore {
    facade: Arc<ApiFacade>,
    list: StateCell<ListState<Page<Tutor>>>,
    detail: StateCell<StoreState<Tutor>>,
    form: StateCell<StoreState<Tutor>>,
    list_seq: LoadSeq,
    detail_seq: LoadSeq,
    form_seq: LoadSeq,
}

impl TutorStore {
    pub fn new(facade: Arc<ApiFacade>) -> Self {
        Self {
            facade,
            list: StateCell::default(),
            detail: StateCell::default(),
            form: StateCell::default(),
            list_seq: LoadSeq::default(),
            detail_seq: LoadSeq::default(),
            form_seq: LoadSeq::default(),
        }
    }

    pub fn list_state(&self) -> ListState<Page<Tutor>> {
        self.list.get()
    }

    pub fn subscribe_list(&self) -> watch::Receiver<ListState<Page<Tutor>>> {
        self.list.subscribe()
    }

    pub fn detail_state(&self) -> StoreState<Tutor> {
        self.detail.get()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<StoreState<Tutor>> {
        self.detail.subscribe()
    }

    pub fn form_state(&self) -> StoreState<Tutor> {
        self.form.get()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<StoreState<Tutor>> {
        self.form.subscribe()
    }

    pub async fn load_list(&self, page: u32, size: u32, search: Option<&str>) -> Result<()> {
        let seq = self.list_seq.begin();
        self.list.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.list_tutors(page, size, search).await {
            Ok(response) => {
                if self.list_seq.is_current(seq) {
                    let term = search.unwrap_or_default().to_string();
                    self.list.update(|s| {
                        s.data = Some(response);
                        s.loading = false;
                        s.error = None;
                        s.page = page;
                        s.search_term = term;
                    });
                }
                Ok(())
            }
            Err(e) => {
                if self.list_seq.is_current(seq) {
                    let err = e.clone();
                    self.list.update(|s| {
                        s.loading = false;
                        s.error = Some(err);
                    });
                }
                Err(e)
            }
        }
    }

    pub async fn load_detail(&self, id: &EntityId) -> Result<()> {
        let seq = self.detail_seq.begin();
        self.detail.update(|s| {
            s.loading = true;
            s.error = None;
        });

        // Detail pages show the linked pets, so the relation is always
        // materialized here.
        match self.facade.get_tutor_with_pets(id).await {
            Ok(tutor) => {
                if self.detail_seq.is_current(seq) {
                    self.detail.set(StoreState {
                        data: Some(tutor),
                        loading: false,
                        error: None,
                    });
                }
                Ok(())
            }
            Err(e) => {
                if self.detail_seq.is_current(seq) {
                    let err = e.clone();
                    self.detail.update(|s| {
                        s.loading = false;
                        s.error = Some(err);
                    });
                }
                Err(e)
            }
        }
    }

    pub async fn load_for_form(&self, id: &EntityId) -> Result<()> {
        let seq = self.form_seq.begin();
        self.form.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.get_tutor(id).await {
            Ok(tutor) => {
                if self.form_seq.is_current(seq) {
                    self.form.set(StoreState {
                        data: Some(tutor),
                        loading: false,
                        error: None,
                    });
                }
                Ok(())
            }
            Err(e) => {
                if self.form_seq.is_current(seq) {
                    let err = e.clone();
                    self.form.update(|s| {
                        s.loading = false;
                        s.error = Some(err);
                    });
                }
                Err(e)
            }
        }
    }

    pub async fn create(&self, data: &CreateTutorDto) -> Result<Tutor> {
        self.form.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.create_tutor(data).await {
            Ok(tutor) => {
                self.form.set(StoreState {
                    data: Some(tutor.clone()),
                    loading: false,
                    error: None,
                });
                self.refresh_list().await?;
                Ok(tutor)
            }
            Err(e) => {
                let err = e.clone();
                self.form.update(|s| {
                    s.loading = false;
                    s.error = Some(err);
                });
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: &EntityId, data: &UpdateTutorDto) -> Result<Tutor> {
        self.form.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.update_tutor(id, data).await {
            Ok(tutor) => {
                self.form.set(StoreState {
                    data: Some(tutor.clone()),
                    loading: false,
                    error: None,
                });
                self.refresh_list().await?;
                if self.detail.get().data.map(|t| t.id) == Some(tutor.id.clone()) {
                    self.load_detail(id).await?;
                }
                Ok(tutor)
            }
            Err(e) => {
                let err = e.clone();
                self.form.update(|s| {
                    s.loading = false;
                    s.error = Some(err);
                });
                Err(e)
            }
        }
    }

    /// Delete a tutor after detaching all linked pets, then refresh.
    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.facade.unlink_all_pets(id).await?;
        self.facade.delete_tutor(id).await?;
        self.refresh_list().await
    }

    /// Link a pet and reload the detail slice so the relation reflects
    /// server state.
    pub async fn link_pet(&self, tutor_id: &EntityId, pet_id: &EntityId) -> Result<()> {
        self.facade.link_pet(tutor_id, pet_id).await?;
        self.reload_detail_if_loaded(tutor_id).await
    }

    pub async fn unlink_pet(&self, tutor_id: &EntityId, pet_id: &EntityId) -> Result<()> {
        self.facade.unlink_pet(tutor_id, pet_id).await?;
        self.reload_detail_if_loaded(tutor_id).await
    }

    pub async fn upload_photo(&self, id: &EntityId, upload: &PhotoUpload) -> Result<Photo> {
        match self.facade.upload_tutor_photo(id, upload).await {
            Ok(photo) => {
                self.apply_photo(id, Some(photo.clone()));
                Ok(photo)
            }
            Err(e) => {
                let err = e.clone();
                self.form.update(|s| s.error = Some(err));
                Err(e)
            }
        }
    }

    pub async fn delete_photo(&self, id: &EntityId, foto_id: &EntityId) -> Result<()> {
        match self.facade.delete_tutor_photo(id, foto_id).await {
            Ok(()) => {
                self.apply_photo(id, None);
                Ok(())
            }
            Err(e) => {
                let err = e.clone();
                self.form.update(|s| s.error = Some(err));
                Err(e)
            }
        }
    }

    fn apply_photo(&self, id: &EntityId, photo: Option<Photo>) {
        let form_photo = photo.clone();
        self.form.update(|s| {
            if let Some(tutor) = s.data.as_mut().filter(|t| &t.id == id) {
                tutor.foto = form_photo;
            }
        });
        self.detail.update(|s| {
            if let Some(tutor) = s.data.as_mut().filter(|t| &t.id == id) {
                tutor.foto = photo;
            }
        });
    }

    pub fn set_page(&self, page: u32) {
        self.list.update(|s| s.page = page);
    }

    pub fn set_search_term(&self, term: &str) {
        let term = term.to_string();
        self.list.update(|s| {
            s.search_term = term;
            s.page = 0;
        });
    }

    pub fn reset_detail_state(&self) {
        self.detail.set(StoreState::default());
    }

    pub fn reset_form_state(&self) {
        self.form.set(StoreState::default());
    }

    async fn reload_detail_if_loaded(&self, id: &EntityId) -> Result<()> {
        if self.detail.get().data.map(|t| t.id).as_ref() == Some(id) {
            self.load_detail(id).await?;
        }
        Ok(())
    }

    async fn refresh_list(&self) -> Result<()> {
        let current = self.list.get();
        let search = (!current.search_term.trim().is_empty()).then_some(current.search_term);
        self.load_list(current.page, DEFAULT_PAGE_SIZE, search.as_deref())
            .await
    }
}
