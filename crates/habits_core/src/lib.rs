//! Core domain logic for the habits backend.
//! This crate is the single source of truth for key layout, tenant scoping
//! and update semantics.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::habit::{Habit, HabitRequest};
pub use model::habit_log::{HabitLog, HabitLogRequest};
pub use model::{EntityId, TenantId};
pub use repo::habit_log_repo::{HabitLogRepository, StoreHabitLogRepository};
pub use repo::habit_repo::{HabitRepository, StoreHabitRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::habit_log_service::HabitLogService;
pub use service::habit_service::HabitService;
pub use service::{Clock, ServiceError, ServiceResult};
pub use store::{Item, ItemKey, ItemStore, SqliteItemStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
