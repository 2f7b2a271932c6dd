//! Use-case services for habits and habit logs.
//!
//! # Responsibility
//! - Assign ids and timestamps to new entities.
//! - Implement update as load, overlay, rewrite.
//! - Keep HTTP callers decoupled from repository details.
//!
//! # Invariants
//! - Update loads the entity first; that load is the only existence check.
//! - No cross-entity validation between logs and habits.

use crate::model::EntityId;
use crate::repo::{EntityKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub mod habit_log_service;
pub mod habit_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Source of "now" in Unix epoch seconds.
pub type Clock = fn() -> i64;

/// Reads the system clock; a clock before 1970 reads as `0`.
pub fn system_clock() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

/// Generates a fresh opaque entity id.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Service error for habit and habit log use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target entity does not exist in the caller's partition.
    NotFound { kind: EntityKind, id: EntityId },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{new_entity_id, system_clock, ServiceError};
    use crate::repo::{EntityKind, RepoError};

    #[test]
    fn repo_not_found_maps_to_service_not_found() {
        let err = ServiceError::from(RepoError::NotFound {
            kind: EntityKind::HabitLog,
            id: "x".to_string(),
        });
        assert!(matches!(
            err,
            ServiceError::NotFound { kind: EntityKind::HabitLog, ref id } if id == "x"
        ));
    }

    #[test]
    fn generated_ids_are_unique_and_non_empty() {
        let first = new_entity_id();
        let second = new_entity_id();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(system_clock() > 1_600_000_000);
    }
}
