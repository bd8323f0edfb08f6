// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use async_trait::async_trait;
use habit_logger::config::Config;
use habit_logger::db::{FirestoreStore, MemoryStore};
use habit_logger::routes::create_router;
use habit_logger::services::{CompletionService, HabitDetails, HabitMetadataSource, UserValidator};
use habit_logger::AppState;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test store connection against the emulator.
#[allow(dead_code)]
pub async fn test_store() -> FirestoreStore {
    FirestoreStore::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// User validator stub with a fixed verdict.
pub struct StubValidator {
    pub accept: bool,
}

#[async_trait]
impl UserValidator for StubValidator {
    async fn validate(&self, _user_id: &str) -> bool {
        self.accept
    }
}

/// Habit service stub with a canned metadata answer.
pub struct StubHabitSource {
    pub details: Option<HabitDetails>,
}

#[async_trait]
impl HabitMetadataSource for StubHabitSource {
    async fn fetch_details(&self, _habit_id: &str) -> Option<HabitDetails> {
        self.details.clone()
    }
}

/// Metadata for a habit the habit service knows about.
#[allow(dead_code)]
pub fn sample_details() -> HabitDetails {
    HabitDetails {
        title: Some("Morning run".to_string()),
        description: Some("5k before breakfast".to_string()),
        frequency: Some("daily".to_string()),
        days: vec!["MONDAY".to_string(), "WEDNESDAY".to_string()],
        created_at: None,
        streak: 0,
        longest_streak: 0,
    }
}

/// Create a test app over an in-memory store with stubbed upstream services.
/// Returns the router, a handle to the store, and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<MemoryStore>, Arc<AppState>) {
    create_test_app_with(true, Some(sample_details()))
}

/// Like [`create_test_app`] but with explicit validator verdict and metadata.
#[allow(dead_code)]
pub fn create_test_app_with(
    accept_users: bool,
    details: Option<HabitDetails>,
) -> (axum::Router, Arc<MemoryStore>, Arc<AppState>) {
    let config = Config::default();
    let store = Arc::new(MemoryStore::new());

    let completions = CompletionService::new(
        store.clone(),
        Arc::new(StubValidator {
            accept: accept_users,
        }),
        Arc::new(StubHabitSource { details }),
    );

    let state = Arc::new(AppState {
        config,
        completions,
    });

    (create_router(state.clone()), store, state)
}

/// Sign a raw event body the way the habit service does.
#[allow(dead_code)]
pub fn sign_event(key: &[u8], body: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC-SHA256 accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}
