//! Habit repository contract and item-store implementation.
//!
//! # Responsibility
//! - Persist habits as `habit#<id>` items inside the tenant partition.
//!
//! # Invariants
//! - `create_habit` and `update_habit` are unconditional overwrites.
//! - `delete_habit` leaves the habit's logs untouched.

use super::{delete_entity, find_entity, list_entities, put_entity, EntityKind, RepoResult};
use crate::model::habit::Habit;
use crate::store::ItemStore;
use log::info;

/// Repository interface for habit CRUD operations.
pub trait HabitRepository {
    fn create_habit(&self, tenant_id: &str, habit: &Habit) -> RepoResult<()>;
    fn list_habits(&self, tenant_id: &str) -> RepoResult<Vec<Habit>>;
    fn find_habit_by_id(&self, tenant_id: &str, habit_id: &str) -> RepoResult<Habit>;
    fn delete_habit(&self, tenant_id: &str, habit_id: &str) -> RepoResult<()>;
    /// Overwrites the item at `habit_id` without checking it exists.
    fn update_habit(&self, tenant_id: &str, habit_id: &str, habit: &Habit) -> RepoResult<()>;
}

/// Habit repository backed by any [`ItemStore`].
pub struct StoreHabitRepository<S> {
    store: S,
}

impl<S: ItemStore> StoreHabitRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ItemStore> HabitRepository for StoreHabitRepository<S> {
    fn create_habit(&self, tenant_id: &str, habit: &Habit) -> RepoResult<()> {
        put_entity(
            &self.store,
            EntityKind::Habit,
            "put_item",
            tenant_id,
            &habit.id,
            habit,
        )
    }

    fn list_habits(&self, tenant_id: &str) -> RepoResult<Vec<Habit>> {
        list_entities(&self.store, EntityKind::Habit, tenant_id)
    }

    fn find_habit_by_id(&self, tenant_id: &str, habit_id: &str) -> RepoResult<Habit> {
        find_entity(&self.store, EntityKind::Habit, tenant_id, habit_id)
    }

    fn delete_habit(&self, tenant_id: &str, habit_id: &str) -> RepoResult<()> {
        // Logs referencing this habit stay in place.
        delete_entity(&self.store, EntityKind::Habit, tenant_id, habit_id)?;
        info!(
            "event=habit_delete module=repo status=ok tenant_id={} habit_id={}",
            tenant_id, habit_id
        );
        Ok(())
    }

    fn update_habit(&self, tenant_id: &str, habit_id: &str, habit: &Habit) -> RepoResult<()> {
        put_entity(
            &self.store,
            EntityKind::Habit,
            "put_item",
            tenant_id,
            habit_id,
            habit,
        )?;
        info!(
            "event=habit_update module=repo status=ok tenant_id={} habit_id={}",
            tenant_id, habit_id
        );
        Ok(())
    }
}
