// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST API routes for habit completion logging and analytics.

use crate::error::{AppError, Result};
use crate::models::HabitLogSummary;
use crate::services::CompletionRequest;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

/// Habit log routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/habit-logs/complete", post(log_completion))
        .route("/api/habit-logs/user/{user_id}", get(get_user_analytics))
        .route(
            "/api/habit-logs/user/{user_id}/habit/{habit_id}",
            get(get_habit_analytics),
        )
        .route(
            "/api/habit-logs/user/{user_id}/habit/{habit_id}/refresh",
            put(refresh_habit),
        )
}

// ─── Completion Logging ──────────────────────────────────────

/// Record a habit completion.
///
/// Creates the log on first completion, enriching it with metadata from
/// the habit service.
async fn log_completion(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<HabitLogSummary>> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let summary = state.completions.record_completion(request).await?;
    Ok(Json(summary))
}

// ─── Analytics ───────────────────────────────────────────────

/// Analytics for every habit of a user.
async fn get_user_analytics(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<HabitLogSummary>>> {
    let summaries = state.completions.user_analytics(&user_id).await?;
    Ok(Json(summaries))
}

/// Analytics for one habit of a user.
async fn get_habit_analytics(
    State(state): State<Arc<AppState>>,
    Path((user_id, habit_id)): Path<(String, String)>,
) -> Result<Json<HabitLogSummary>> {
    let summary = state
        .completions
        .habit_analytics(&user_id, &habit_id)
        .await?;
    Ok(Json(summary))
}

// ─── Metadata Refresh ────────────────────────────────────────

/// Re-pull habit metadata from the habit service into the stored log.
async fn refresh_habit(
    State(state): State<Arc<AppState>>,
    Path((user_id, habit_id)): Path<(String, String)>,
) -> Result<Json<HabitLogSummary>> {
    let summary = state
        .completions
        .refresh_metadata(&user_id, &habit_id)
        .await?;
    Ok(Json(summary))
}
