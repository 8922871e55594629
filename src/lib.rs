// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet Manager API client.
//!
//! Async client for the Pet Manager REST API: typed pet/tutor services, a
//! facade with compound operations, reactive stores for list/detail/form
//! state, and transparent session recovery (silent token refresh with
//! reauthentication fallback and queued-request replay).

pub mod client;
pub mod config;
pub mod error;
pub mod facade;
pub mod http;
pub mod models;
pub mod services;
pub mod session;
pub mod stores;

pub use client::PetManagerClient;
pub use config::Config;
pub use error::{ApiError, Result};
