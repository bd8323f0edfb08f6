// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar-day arithmetic.

use chrono::{DateTime, NaiveDate, Utc};

/// Project a UTC timestamp onto its UTC calendar day.
pub fn utc_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Whole days from `earlier` to `later` (negative if `later` precedes `earlier`).
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}
