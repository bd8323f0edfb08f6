// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod completion;
pub mod habits;
pub mod streak;
pub mod validation;

pub use completion::{CompletionRequest, CompletionService};
pub use habits::{HabitDetails, HabitMetadataSource, HttpHabitSource};
pub use streak::StreakState;
pub use validation::{HttpUserValidator, UserValidator};
