// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Habit completion log model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Lifecycle status of a tracked habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HabitStatus {
    #[default]
    Active,
    Paused,
    Archived,
}

/// Stored completion log in Firestore, one per (user, habit) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitLog {
    /// Habit ID from the habit activity service
    pub habit_id: String,
    /// Owning user ID
    pub user_id: String,
    /// Habit title (denormalized from the habit service)
    pub title: String,
    /// Optional habit description
    #[serde(default)]
    pub description: Option<String>,
    /// Cadence label ("daily", "weekly", ...)
    pub frequency: String,
    /// Scheduled days for non-daily habits (e.g. ["MONDAY", "THURSDAY"])
    #[serde(default)]
    pub days: Vec<String>,
    /// Every recorded completion timestamp, oldest first
    #[serde(default)]
    pub completions: Vec<DateTime<Utc>>,
    /// Most recent completion (None until the first one lands)
    #[serde(default)]
    pub last_completion_at: Option<DateTime<Utc>>,
    /// Consecutive-day run ending at the most recent completion
    #[serde(default)]
    pub current_streak: u32,
    /// Longest consecutive-day run ever recorded
    #[serde(default)]
    pub longest_streak: u32,
    /// Habit lifecycle status
    #[serde(default)]
    pub status: HabitStatus,
    /// When this log was first created
    pub created_at: DateTime<Utc>,
    /// Last write to this log
    pub updated_at: DateTime<Utc>,
}

impl HabitLog {
    /// Total number of recorded completions.
    pub fn total_completions(&self) -> u32 {
        self.completions.len() as u32
    }
}
