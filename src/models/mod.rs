// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod log;
pub mod summary;

pub use log::{HabitLog, HabitStatus};
pub use summary::HabitLogSummary;
