// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed façades over the transport: one method per REST operation.

pub mod auth;
pub mod pets;
pub mod tutors;

pub use auth::AuthService;
pub use pets::PetService;
pub use tutors::TutorService;

/// Build the `page`/`size`/`nome` query for the list endpoints.
///
/// Empty or whitespace-only search terms are omitted from the request
/// entirely, never sent as empty strings.
pub(crate) fn list_query(page: u32, size: u32, nome: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
    if let Some(nome) = nome.map(str::trim).filter(|n| !n.is_empty()) {
        query.push(("nome", nome.to_string()));
    }
    query
}
