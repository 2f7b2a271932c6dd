//! Habit log repository contract and item-store implementation.
//!
//! # Responsibility
//! - Persist habit logs as `habit-log#<id>` items inside the tenant partition.
//!
//! # Invariants
//! - `habit_id` is stored as given; the referenced habit may not exist.

use super::{delete_entity, find_entity, list_entities, put_entity, EntityKind, RepoResult};
use crate::model::habit_log::HabitLog;
use crate::store::ItemStore;
use log::info;

/// Repository interface for habit log CRUD operations.
pub trait HabitLogRepository {
    fn create_habit_log(&self, tenant_id: &str, log: &HabitLog) -> RepoResult<()>;
    fn list_habit_logs(&self, tenant_id: &str) -> RepoResult<Vec<HabitLog>>;
    fn find_habit_log_by_id(&self, tenant_id: &str, log_id: &str) -> RepoResult<HabitLog>;
    fn delete_habit_log(&self, tenant_id: &str, log_id: &str) -> RepoResult<()>;
    fn update_habit_log(&self, tenant_id: &str, log_id: &str, log: &HabitLog) -> RepoResult<()>;
}

/// Habit log repository backed by any [`ItemStore`].
pub struct StoreHabitLogRepository<S> {
    store: S,
}

impl<S: ItemStore> StoreHabitLogRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ItemStore> HabitLogRepository for StoreHabitLogRepository<S> {
    fn create_habit_log(&self, tenant_id: &str, log: &HabitLog) -> RepoResult<()> {
        put_entity(
            &self.store,
            EntityKind::HabitLog,
            "put_item",
            tenant_id,
            &log.id,
            log,
        )
    }

    fn list_habit_logs(&self, tenant_id: &str) -> RepoResult<Vec<HabitLog>> {
        list_entities(&self.store, EntityKind::HabitLog, tenant_id)
    }

    fn find_habit_log_by_id(&self, tenant_id: &str, log_id: &str) -> RepoResult<HabitLog> {
        find_entity(&self.store, EntityKind::HabitLog, tenant_id, log_id)
    }

    fn delete_habit_log(&self, tenant_id: &str, log_id: &str) -> RepoResult<()> {
        delete_entity(&self.store, EntityKind::HabitLog, tenant_id, log_id)?;
        info!(
            "event=habit_log_delete module=repo status=ok tenant_id={} log_id={}",
            tenant_id, log_id
        );
        Ok(())
    }

    fn update_habit_log(&self, tenant_id: &str, log_id: &str, log: &HabitLog) -> RepoResult<()> {
        put_entity(
            &self.store,
            EntityKind::HabitLog,
            "put_item",
            tenant_id,
            log_id,
            log,
        )?;
        info!(
            "event=habit_log_update module=repo status=ok tenant_id={} log_id={}",
            tenant_id, log_id
        );
        Ok(())
    }
}
