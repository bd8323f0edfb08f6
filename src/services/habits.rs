// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit metadata client for the habit activity service.
//!
//! Metadata fetches are best-effort. Callers get `None` on any failure and
//! fall back to placeholder fields, so a habit service outage never blocks
//! completion logging.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppError;

/// Habit metadata as served by the habit activity service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDetails {
    pub title: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    #[serde(default)]
    pub days: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

/// Source of habit metadata for log enrichment.
#[async_trait]
pub trait HabitMetadataSource: Send + Sync {
    /// Fetch metadata for a habit. `None` means the source has no answer
    /// right now, not that the habit is gone.
    async fn fetch_details(&self, habit_id: &str) -> Option<HabitDetails>;
}

/// Metadata source backed by the habit activity service's REST API.
#[derive(Clone)]
pub struct HttpHabitSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpHabitSource {
    /// Create a metadata client with a fixed per-request timeout.
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl HabitMetadataSource for HttpHabitSource {
    async fn fetch_details(&self, habit_id: &str) -> Option<HabitDetails> {
        let url = format!("{}/{}", self.base_url, habit_id);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(habit_id, error = %e, "Habit metadata request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                habit_id,
                status = %response.status(),
                "Habit service returned no metadata"
            );
            return None;
        }

        match response.json::<HabitDetails>().await {
            Ok(details) => {
                tracing::debug!(
                    habit_id,
                    title = details.title.as_deref().unwrap_or("<none>"),
                    "Fetched habit metadata"
                );
                Some(details)
            }
            Err(e) => {
                tracing::error!(habit_id, error = %e, "Malformed habit metadata response");
                None
            }
        }
    }
}
