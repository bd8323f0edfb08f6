// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit completion service.
//!
//! Handles the core workflow:
//! 1. Validate the user against the user service
//! 2. Find the existing log, or create one enriched with habit metadata
//! 3. Append the completion and recompute streaks
//! 4. Store the log in Firestore
//! 5. Project the log into its analytics view
//!
//! Completions arrive both from the REST API and from pushed habit events;
//! both paths funnel into [`CompletionService::record_completion`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::RecordStore;
use crate::error::{AppError, Result};
use crate::models::{HabitLog, HabitLogSummary, HabitStatus};
use crate::services::habits::{HabitDetails, HabitMetadataSource};
use crate::services::streak;
use crate::services::validation::UserValidator;
use crate::time_utils::utc_day;

/// A single habit completion to record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompletionRequest {
    /// Habit ID from the habit activity service
    #[serde(alias = "habitId")]
    #[validate(length(min = 1, message = "habit_id must not be empty"))]
    pub habit_id: String,
    /// User who completed the habit
    #[serde(alias = "userId")]
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    /// When the habit was completed (defaults to now)
    #[serde(alias = "completionTime")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub completed_at: Option<DateTime<Utc>>,
    /// Free-form notes. Logged for observability, never stored.
    pub notes: Option<String>,
}

/// Completion logging and analytics over habit logs.
pub struct CompletionService {
    store: Arc<dyn RecordStore>,
    validator: Arc<dyn UserValidator>,
    habits: Arc<dyn HabitMetadataSource>,
}

impl CompletionService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        validator: Arc<dyn UserValidator>,
        habits: Arc<dyn HabitMetadataSource>,
    ) -> Self {
        Self {
            store,
            validator,
            habits,
        }
    }

    /// Record a completion, creating the log on first touch.
    pub async fn record_completion(&self, request: CompletionRequest) -> Result<HabitLogSummary> {
        tracing::info!(
            user_id = %request.user_id,
            habit_id = %request.habit_id,
            "Recording habit completion"
        );

        // 1. Validate the user before any write
        if !self.validator.validate(&request.user_id).await {
            return Err(AppError::InvalidUser(request.user_id.clone()));
        }

        if let Some(notes) = request.notes.as_deref() {
            tracing::debug!(
                user_id = %request.user_id,
                habit_id = %request.habit_id,
                notes,
                "Completion notes received"
            );
        }

        let now = Utc::now();
        let completed_at = request.completed_at.unwrap_or(now);

        // 2. Find-or-create, then fold in the completion
        let log = match self
            .store
            .find_by_key(&request.user_id, &request.habit_id)
            .await?
        {
            Some(mut log) => {
                apply_completion(&mut log, completed_at, now);
                log
            }
            None => {
                // First completion for this habit: enrich from the habit
                // service, fall back to placeholders if it has no answer.
                let details = self.habits.fetch_details(&request.habit_id).await;
                build_log(&request.user_id, &request.habit_id, details, completed_at, now)
            }
        };

        // 3. Persist and project
        self.store.save(&log).await?;

        tracing::info!(
            user_id = %log.user_id,
            habit_id = %log.habit_id,
            current_streak = log.current_streak,
            longest_streak = log.longest_streak,
            "Habit completion recorded"
        );

        Ok(HabitLogSummary::from_log(&log, utc_day(now)))
    }

    /// Analytics views for every habit of a user.
    pub async fn user_analytics(&self, user_id: &str) -> Result<Vec<HabitLogSummary>> {
        tracing::info!(user_id, "Computing user analytics");

        if !self.validator.validate(user_id).await {
            return Err(AppError::InvalidUser(user_id.to_string()));
        }

        let today = utc_day(Utc::now());
        let logs = self.store.find_all_by_user(user_id).await?;

        Ok(logs
            .iter()
            .map(|log| HabitLogSummary::from_log(log, today))
            .collect())
    }

    /// Analytics view for one habit of a user.
    pub async fn habit_analytics(&self, user_id: &str, habit_id: &str) -> Result<HabitLogSummary> {
        tracing::info!(user_id, habit_id, "Computing habit analytics");

        if !self.validator.validate(user_id).await {
            return Err(AppError::InvalidUser(user_id.to_string()));
        }

        let log = self
            .store
            .find_by_key(user_id, habit_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Habit log {}", habit_id)))?;

        Ok(HabitLogSummary::from_log(&log, utc_day(Utc::now())))
    }

    /// Re-pull metadata from the habit service into an existing log.
    ///
    /// Completion history and streaks are untouched; only the descriptive
    /// fields change. If the habit service has no answer the stored log is
    /// returned as-is.
    pub async fn refresh_metadata(&self, user_id: &str, habit_id: &str) -> Result<HabitLogSummary> {
        tracing::info!(user_id, habit_id, "Refreshing habit metadata");

        if !self.validator.validate(user_id).await {
            return Err(AppError::InvalidUser(user_id.to_string()));
        }

        let mut log = self
            .store
            .find_by_key(user_id, habit_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Habit log {}", habit_id)))?;

        let today = utc_day(Utc::now());
        let Some(details) = self.habits.fetch_details(habit_id).await else {
            tracing::warn!(habit_id, "No fresh metadata available, returning stored log");
            return Ok(HabitLogSummary::from_log(&log, today));
        };

        if let Some(title) = details.title {
            log.title = title;
        }
        if let Some(frequency) = details.frequency {
            log.frequency = frequency;
        }
        log.description = details.description;
        log.days = details.days;
        log.updated_at = Utc::now();

        self.store.save(&log).await?;
        Ok(HabitLogSummary::from_log(&log, today))
    }
}

/// Append a completion to an existing log and refresh its derived fields.
fn apply_completion(log: &mut HabitLog, completed_at: DateTime<Utc>, now: DateTime<Utc>) {
    log.completions.push(completed_at);
    // Backfilled completions may be older than what is already recorded,
    // so the marker is the maximum, not the newest arrival.
    log.last_completion_at = log.completions.iter().max().copied();
    log.updated_at = now;
    streak::recompute(log, utc_day(now));
}

/// Assemble the initial log for a habit's first recorded completion.
///
/// Metadata seeds the descriptive fields and any pre-existing streaks; a
/// habit service miss leaves placeholder fields for a later refresh.
fn build_log(
    user_id: &str,
    habit_id: &str,
    details: Option<HabitDetails>,
    completed_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> HabitLog {
    let fallback_title = format!("Habit {}", habit_id);

    match details {
        Some(details) => HabitLog {
            habit_id: habit_id.to_string(),
            user_id: user_id.to_string(),
            title: details.title.unwrap_or(fallback_title),
            description: details.description,
            frequency: details.frequency.unwrap_or_else(|| "daily".to_string()),
            days: details.days,
            completions: vec![completed_at],
            last_completion_at: Some(completed_at),
            current_streak: details.streak.max(1),
            longest_streak: details.longest_streak.max(1),
            status: HabitStatus::Active,
            created_at: details.created_at.unwrap_or(now),
            updated_at: now,
        },
        None => HabitLog {
            habit_id: habit_id.to_string(),
            user_id: user_id.to_string(),
            title: fallback_title,
            description: None,
            frequency: "daily".to_string(),
            days: vec![],
            completions: vec![completed_at],
            last_completion_at: Some(completed_at),
            current_streak: 1,
            longest_streak: 1,
            status: HabitStatus::Active,
            created_at: now,
            updated_at: now,
        },
    }
}
