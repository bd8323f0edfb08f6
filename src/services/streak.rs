// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak computation over completion histories.
//!
//! Streaks are counted in distinct UTC calendar days. Multiple completions
//! on the same day collapse into one, so logging twice never breaks a run.
//! The current streak stays alive through a one-day grace window: it only
//! resets once a full day passes with no completion.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::HabitLog;
use crate::time_utils::{days_between, utc_day};

/// Computed streak state for a completion history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    /// Run of consecutive days ending at the most recent completion,
    /// or 0 if that run has gone stale.
    pub current: u32,
    /// Longest run of consecutive days anywhere in the history.
    pub longest: u32,
}

/// Compute streaks from raw completion timestamps, evaluated as of `today`.
pub fn compute(completions: &[DateTime<Utc>], today: NaiveDate) -> StreakState {
    let mut days: Vec<NaiveDate> = completions.iter().map(|ts| utc_day(*ts)).collect();
    days.sort_unstable();
    days.dedup();

    if days.is_empty() {
        return StreakState {
            current: 0,
            longest: 0,
        };
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in days.windows(2) {
        if days_between(pair[0], pair[1]) == 1 {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
    }
    longest = longest.max(run);

    // The final run survives as the current streak only while the last
    // completion is from today or yesterday.
    let last_day = days[days.len() - 1];
    let current = if days_between(last_day, today) <= 1 {
        run
    } else {
        0
    };

    StreakState { current, longest }
}

/// Recompute and store the streak fields of a log.
///
/// Sorts the stored completion history as a side effect. An empty history
/// zeroes the current streak but leaves the longest streak untouched, so
/// metadata seeded at creation survives until real completions arrive.
pub fn recompute(log: &mut HabitLog, today: NaiveDate) {
    log.completions.sort_unstable();

    if log.completions.is_empty() {
        log.current_streak = 0;
        return;
    }

    let state = compute(&log.completions, today);
    log.current_streak = state.current;
    log.longest_streak = state.longest;
}
