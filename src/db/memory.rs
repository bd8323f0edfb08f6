// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory habit log store for tests and local development.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::db::RecordStore;
use crate::error::AppError;
use crate::models::HabitLog;

/// Concurrent map keyed by (user_id, habit_id).
#[derive(Default)]
pub struct MemoryStore {
    logs: DashMap<(String, String), HabitLog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored logs.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_key(
        &self,
        user_id: &str,
        habit_id: &str,
    ) -> Result<Option<HabitLog>, AppError> {
        let key = (user_id.to_string(), habit_id.to_string());
        Ok(self.logs.get(&key).map(|entry| entry.value().clone()))
    }

    async fn find_all_by_user(&self, user_id: &str) -> Result<Vec<HabitLog>, AppError> {
        let mut logs: Vec<HabitLog> = self
            .logs
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        logs.sort_by_key(|log| log.created_at);
        Ok(logs)
    }

    async fn save(&self, log: &HabitLog) -> Result<(), AppError> {
        let key = (log.user_id.clone(), log.habit_id.clone());
        self.logs.insert(key, log.clone());
        Ok(())
    }
}
