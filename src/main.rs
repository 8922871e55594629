// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet Manager console: bootstraps a session and prints collection
//! summaries, mostly useful as a connectivity smoke check.

use anyhow::bail;
use pet_manager_client::{Config, PetManagerClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(base_url = %config.api_base_url, "Starting Pet Manager client");

    let client = PetManagerClient::new(config)?;

    if !client.auth_store.initialize().await {
        bail!("authentication failed");
    }
    tracing::info!("Session established");

    client.pet_store.load_list(0, 10, None).await?;
    client.tutor_store.load_list(0, 10, None).await?;

    if let Some(pets) = client.pet_store.list_state().data {
        tracing::info!(
            total = pets.total,
            pages = pets.page_count,
            shown = pets.content.len(),
            "Pets loaded"
        );
        for pet in &pets.content {
            tracing::info!(id = %pet.id, nome = %pet.nome, raca = %pet.raca, idade = pet.idade, "Pet");
        }
    }

    if let Some(tutors) = client.tutor_store.list_state().data {
        tracing::info!(
            total = tutors.total,
            pages = tutors.page_count,
            shown = tutors.content.len(),
            "Tutors loaded"
        );
        for tutor in &tutors.content {
            tracing::info!(id = %tutor.id, nome = %tutor.nome, email = %tutor.email, "Tutor");
        }
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pet_manager_client=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
