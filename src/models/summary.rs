// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! API projection of a habit log with derived analytics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{HabitLog, HabitStatus};
use crate::time_utils::{days_between, utc_day};

/// Analytics view of a habit log for API responses.
///
/// Derived fields (`total_completions`, `success_rate`) are computed at
/// read time so they always reflect the stored completion history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HabitLogSummary {
    pub habit_id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    pub days: Vec<String>,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<string>"))]
    pub completions: Vec<DateTime<Utc>>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_completion_at: Option<DateTime<Utc>>,
    pub status: HabitStatus,
    pub total_completions: u32,
    pub success_rate: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

impl HabitLogSummary {
    /// Build the analytics view of a log, evaluating derived metrics
    /// against the given calendar day.
    pub fn from_log(log: &HabitLog, today: NaiveDate) -> Self {
        Self {
            habit_id: log.habit_id.clone(),
            user_id: log.user_id.clone(),
            title: log.title.clone(),
            description: log.description.clone(),
            frequency: log.frequency.clone(),
            days: log.days.clone(),
            current_streak: log.current_streak,
            longest_streak: log.longest_streak,
            completions: log.completions.clone(),
            last_completion_at: log.last_completion_at,
            status: log.status,
            total_completions: log.total_completions(),
            success_rate: success_rate(log, today),
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}

/// Completions per elapsed day since creation, as a percentage in [0, 100].
///
/// Treats the habit as daily regardless of its declared frequency. A habit
/// created today counts as one elapsed day, so a same-day completion
/// scores 100%.
fn success_rate(log: &HabitLog, today: NaiveDate) -> f64 {
    if log.completions.is_empty() {
        return 0.0;
    }

    let elapsed_days = days_between(utc_day(log.created_at), today).max(1);
    let actual = log.completions.len() as f64;

    (actual / elapsed_days as f64 * 100.0).min(100.0)
}
