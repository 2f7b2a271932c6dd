//! Habit entity.

use super::EntityId;
use serde::{Deserialize, Serialize};

/// A recurring activity tracked by one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Free-form display color, usually a hex triplet.
    pub color: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Client-supplied habit fields for create and full-overwrite update.
///
/// Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitRequest {
    pub name: String,
    pub description: String,
    pub color: String,
}

impl Habit {
    /// Builds a habit from request fields with both timestamps set to `now`.
    pub fn from_request(id: impl Into<EntityId>, request: &HabitRequest, now: i64) -> Self {
        Self {
            id: id.into(),
            name: request.name.clone(),
            description: request.description.clone(),
            color: request.color.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every client-owned field and refreshes `updated_at`.
    ///
    /// Empty strings in `request` replace existing values.
    pub fn apply(&mut self, request: &HabitRequest, now: i64) {
        self.name = request.name.clone();
        self.description = request.description.clone();
        self.color = request.color.clone();
        self.updated_at = now;
    }
}
