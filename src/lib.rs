// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Habit-Logger: completion logging and streak analytics
//!
//! This crate provides the backend API that records habit completions and
//! serves streak and success-rate analytics per user and per habit.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::CompletionService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub completions: CompletionService,
}
