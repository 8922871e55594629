// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet store: list, detail and form slices over the facade.

use crate::error::Result;
use crate::facade::ApiFacade;
use crate::models::{CreatePetDto, EntityId, Page, Pet, Photo, PhotoUpload, UpdatePetDto};
use crate::stores::{ListState, LoadSeq, StateCell, StoreState, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use tokio::sync::watch;

pub struct PetStore {
    facade: Arc<ApiFacade>,
    list: StateCell<ListState<Page<Pet>>>,
    detail: StateCell<StoreState<Pet>>,
    form: StateCell<StoreState<Pet>>,
    list_seq: LoadSeq,
    detail_seq: LoadSeq,
    form_seq: LoadSeq,
}

impl PetStore {
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

    // ─── Slice access ────────────────────────────────────────────────────

    pub fn list_state(&self) -> ListState<Page<Pet>> {
        self.list.get()
    }

    pub fn subscribe_list(&self) -> watch::Receiver<ListState<Page<Pet>>> {
        self.list.subscribe()
    }

    pub fn detail_state(&self) -> StoreState<Pet> {
        self.detail.get()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<StoreState<Pet>> {
        self.detail.subscribe()
    }

    pub fn form_state(&self) -> StoreState<Pet> {
        self.form.get()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<StoreState<Pet>> {
        self.form.subscribe()
    }

    // ─── Loads ───────────────────────────────────────────────────────────

    /// Load one page of pets. On failure the previous page stays visible and
    /// the error is both recorded and propagated.
    pub async fn load_list(&self, page: u32, size: u32, search: Option<&str>) -> Result<()> {
        let seq = self.list_seq.begin();
        self.list.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.list_pets(page, size, search).await {
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

        match self.facade.get_pet(id).await {
            Ok(pet) => {
                if self.detail_seq.is_current(seq) {
                    self.detail.set(StoreState {
                        data: Some(pet),
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

    /// Load a pet into the form slice for editing.
    pub async fn load_for_form(&self, id: &EntityId) -> Result<()> {
        let seq = self.form_seq.begin();
        self.form.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.get_pet(id).await {
            Ok(pet) => {
                if self.form_seq.is_current(seq) {
                    self.form.set(StoreState {
                        data: Some(pet),
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

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Create a pet, then re-fetch the list at its current page/search so it
    /// reflects server state (no optimistic patching).
    pub async fn create(&self, data: &CreatePetDto) -> Result<Pet> {
        self.form.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.create_pet(data).await {
            Ok(pet) => {
                self.form.set(StoreState {
                    data: Some(pet.clone()),
                    loading: false,
                    error: None,
                });
                self.refresh_list().await?;
                Ok(pet)
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

    /// Update a pet; refreshes the list and, when loaded, the detail slice.
    pub async fn update(&self, id: &EntityId, data: &UpdatePetDto) -> Result<Pet> {
        self.form.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.facade.update_pet(id, data).await {
            Ok(pet) => {
                self.form.set(StoreState {
                    data: Some(pet.clone()),
                    loading: false,
                    error: None,
                });
                self.refresh_list().await?;
                if self.detail.get().data.map(|p| p.id) == Some(pet.id.clone()) {
                    self.load_detail(id).await?;
                }
                Ok(pet)
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

    /// Delete a pet (unlinking it from its tutors first) and refresh the
    /// list.
    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.facade.delete_pet_and_unlink(id).await?;
        self.refresh_list().await
    }

    /// Upload a photo; only slices whose loaded record matches `id` are
    /// touched.
    pub async fn upload_photo(&self, id: &EntityId, upload: &PhotoUpload) -> Result<Photo> {
        match self.facade.upload_pet_photo(id, upload).await {
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
        match self.facade.delete_pet_photo(id, foto_id).await {
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
            if let Some(pet) = s.data.as_mut().filter(|p| &p.id == id) {
                pet.foto = form_photo;
            }
        });
        self.detail.update(|s| {
            if let Some(pet) = s.data.as_mut().filter(|p| &p.id == id) {
                pet.foto = photo;
            }
        });
    }

    // ─── Pure state updates ──────────────────────────────────────────────

    /// Record the page; the view re-triggers the load.
    pub fn set_page(&self, page: u32) {
        self.list.update(|s| s.page = page);
    }

    /// Record the search term and reset the page to 0.
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

    async fn refresh_list(&self) -> Result<()> {
        let current = self.list.get();
        let search = (!current.search_term.trim().is_empty()).then_some(current.search_term);
        self.load_list(current.page, DEFAULT_PAGE_SIZE, search.as_deref())
            .await
    }
}
