// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit-Logger API Server
//!
//! Records habit completions arriving over REST and as queued habit events,
//! and serves streak and success-rate analytics per user and habit.

use habit_logger::{
    config::Config,
    db::FirestoreStore,
    services::{CompletionService, HttpHabitSource, HttpUserValidator},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Habit-Logger API");

    // Initialize Firestore database
    let store = FirestoreStore::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Upstream service clients
    let validator =
        HttpUserValidator::new(config.user_service_url.clone(), config.upstream_timeout_secs)
            .expect("Failed to build user service client");
    let habits =
        HttpHabitSource::new(config.habit_service_url.clone(), config.upstream_timeout_secs)
            .expect("Failed to build habit service client");
    tracing::info!(
        user_service = %config.user_service_url,
        habit_service = %config.habit_service_url,
        "Upstream clients initialized"
    );

    let completions =
        CompletionService::new(Arc::new(store), Arc::new(validator), Arc::new(habits));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        completions,
    });

    // Build router
    let app = habit_logger::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("habit_logger=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
