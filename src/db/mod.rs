//! Database layer (Firestore, plus an in-memory store for tests).

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::HabitLog;

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    /// Habit completion logs (keyed by user_id + habit_id)
    pub const HABIT_LOGS: &str = "habit_logs";
}

/// Persistence operations for habit logs.
///
/// One log exists per (user, habit) pair; `save` upserts the whole document.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up the log for one habit of one user.
    async fn find_by_key(
        &self,
        user_id: &str,
        habit_id: &str,
    ) -> Result<Option<HabitLog>, AppError>;

    /// All logs belonging to a user, ordered by creation time.
    async fn find_all_by_user(&self, user_id: &str) -> Result<Vec<HabitLog>, AppError>;

    /// Create or replace a log.
    async fn save(&self, log: &HabitLog) -> Result<(), AppError>;
}
