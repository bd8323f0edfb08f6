// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push ingestion for queued habit events.
//!
//! Other services publish habit events to a queue whose push subscription
//! delivers them here over HTTP. Deliveries carry an HMAC-SHA256 hex
//! signature over the raw body; anything unsigned is rejected. Processing
//! failures are logged and acknowledged so the queue never redelivers.

use crate::services::CompletionRequest;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Signature header set by the queue push subscription.
const SIGNATURE_HEADER: &str = "x-event-signature";

/// Event routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/events/habit", post(handle_event))
}

/// Queued habit event message.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct HabitEventMessage {
    event_type: String,
    habit_id: String,
    user_id: String,
    /// When the event happened (defaults to delivery time)
    timestamp: Option<DateTime<Utc>>,
    notes: Option<String>,
}

/// Verify an HMAC-SHA256 hex signature over the raw body.
fn verify_signature(key: &[u8], body: &[u8], signature_hex: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());
    signature_hex == expected
}

/// Handle a pushed habit event (POST).
async fn handle_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !verify_signature(&state.config.event_signing_key, &body, signature) {
        tracing::warn!("Rejected habit event with bad signature");
        return StatusCode::UNAUTHORIZED;
    }

    let event: HabitEventMessage = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse habit event");
            return StatusCode::OK; // Ack malformed messages so the queue drops them
        }
    };

    tracing::info!(
        event_type = %event.event_type,
        habit_id = %event.habit_id,
        user_id = %event.user_id,
        "Habit event received"
    );

    match event.event_type.as_str() {
        "HABIT_COMPLETED" | "COMPLETED" => {
            let request = CompletionRequest {
                habit_id: event.habit_id.clone(),
                user_id: event.user_id.clone(),
                completed_at: event.timestamp,
                notes: event.notes,
            };

            if let Err(e) = state.completions.record_completion(request).await {
                tracing::error!(
                    error = %e,
                    habit_id = %event.habit_id,
                    user_id = %event.user_id,
                    "Failed to process habit completion event"
                );
            }
        }
        "HABIT_CREATED" => {
            tracing::info!(habit_id = %event.habit_id, user_id = %event.user_id, "Habit created");
        }
        "HABIT_UPDATED" => {
            tracing::info!(habit_id = %event.habit_id, user_id = %event.user_id, "Habit updated");
        }
        "HABIT_DELETED" => {
            tracing::info!(habit_id = %event.habit_id, user_id = %event.user_id, "Habit deleted");
        }
        other => {
            tracing::warn!(event_type = %other, "Unknown habit event type");
        }
    }

    // Always ack; failed events are logged, not retried
    StatusCode::OK
}
