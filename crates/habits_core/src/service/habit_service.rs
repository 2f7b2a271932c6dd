//! Habit use-case service.
//!
//! # Responsibility
//! - Provide create/list/find/update/delete entry points for habits.
//! - Own id generation and timestamp assignment.
//!
//! # Invariants
//! - `update_habit` overwrites `name`, `description` and `color`
//!   unconditionally, keeps `created_at`, and refreshes `updated_at`.
//! - Concurrent updates race; the last write wins.

use super::{new_entity_id, system_clock, Clock, ServiceResult};
use crate::model::habit::{Habit, HabitRequest};
use crate::repo::habit_repo::HabitRepository;
use log::info;

/// Habit service facade over repository implementations.
pub struct HabitService<R: HabitRepository> {
    repo: R,
    clock: Clock,
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a service reading the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, system_clock)
    }

    /// Creates a service with a caller-provided clock.
    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Creates a habit with a generated id and `created_at == updated_at`.
    pub fn create_habit(&self, tenant_id: &str, request: &HabitRequest) -> ServiceResult<Habit> {
        let habit = Habit::from_request(new_entity_id(), request, (self.clock)());
        self.repo.create_habit(tenant_id, &habit)?;
        info!(
            "event=habit_create module=service status=ok tenant_id={} habit_id={}",
            tenant_id, habit.id
        );
        Ok(habit)
    }

    pub fn list_habits(&self, tenant_id: &str) -> ServiceResult<Vec<Habit>> {
        Ok(self.repo.list_habits(tenant_id)?)
    }

    pub fn find_habit(&self, tenant_id: &str, habit_id: &str) -> ServiceResult<Habit> {
        Ok(self.repo.find_habit_by_id(tenant_id, habit_id)?)
    }

    /// Overlays request fields onto the stored habit and rewrites it.
    ///
    /// Returns `ServiceError::NotFound` when the habit does not exist.
    pub fn update_habit(
        &self,
        tenant_id: &str,
        habit_id: &str,
        request: &HabitRequest,
    ) -> ServiceResult<Habit> {
        let mut habit = self.repo.find_habit_by_id(tenant_id, habit_id)?;
        habit.apply(request, (self.clock)());
        self.repo.update_habit(tenant_id, habit_id, &habit)?;
        Ok(habit)
    }

    pub fn delete_habit(&self, tenant_id: &str, habit_id: &str) -> ServiceResult<()> {
        Ok(self.repo.delete_habit(tenant_id, habit_id)?)
    }
}
