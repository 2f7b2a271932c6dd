//! Habit log entity.

use super::EntityId;
use serde::{Deserialize, Serialize};

/// One recorded occurrence of a habit.
///
/// `habit_id` is not checked against existing habits, and `date` is kept
/// as the caller sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    pub id: EntityId,
    pub habit_id: String,
    pub date: String,
    pub note: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Client-supplied log fields for create and full-overwrite update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HabitLogRequest {
    pub habit_id: String,
    pub date: String,
    pub note: String,
}

impl HabitLog {
    pub fn from_request(id: impl Into<EntityId>, request: &HabitLogRequest, now: i64) -> Self {
        Self {
            id: id.into(),
            habit_id: request.habit_id.clone(),
            date: request.date.clone(),
            note: request.note.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, request: &HabitLogRequest, now: i64) {
        self.habit_id = request.habit_id.clone();
        self.date = request.date.clone();
        self.note = request.note.clone();
        self.updated_at = now;
    }
}
