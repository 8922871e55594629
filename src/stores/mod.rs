// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reactive state containers between the facade and the view layer.
//!
//! Each store owns independent list/detail/form slices. A slice exposes a
//! synchronously readable current value plus a subscribable change stream,
//! and follows one update discipline: `error` is cleared when a load starts,
//! and `loading` is already false by the time `data` or `error` lands.

pub mod auth_store;
pub mod pet_store;
pub mod state;
pub mod tutor_store;

pub use auth_store::{AuthState, AuthStore};
pub use pet_store::PetStore;
pub use state::StateCell;
pub use tutor_store::TutorStore;

use crate::error::ApiError;

/// Page size used when stores re-fetch the list after a mutation.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// State of a detail/form slice.
#[derive(Debug, Clone)]
pub struct StoreState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// State of a list slice: the page envelope plus pagination inputs.
///
/// Changing the search term always resets `page` to 0.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub page: u32,
    pub search_term: String,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            page: 0,
            search_term: String::new(),
        }
    }
}

/// Monotonic load sequence for one slice.
///
/// Guards against a slow earlier request overwriting the result of a faster
/// later one: completions whose sequence is no longer the latest issued are
/// discarded.
#[derive(Debug, Default)]
pub(crate) struct LoadSeq(std::sync::atomic::AtomicU64);

impl LoadSeq {
    pub fn begin(&self) -> u64 {
        self.0
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            .wrapping_add(1)
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.0.load(std::sync::atomic::Ordering::SeqCst) == seq
    }
}
