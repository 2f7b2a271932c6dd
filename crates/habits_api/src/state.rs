//! Shared router state.

use crate::identity::TenantResolver;
use habits_core::db::{open_db, open_db_in_memory};
use habits_core::{
    HabitLogService, HabitService, ItemStore, SqliteItemStore, StoreError, StoreHabitLogRepository,
    StoreHabitRepository,
};
use std::path::Path;
use std::sync::Arc;

/// Item store shared by every repository of the process.
pub type SharedStore = Arc<dyn ItemStore>;

pub type SharedHabitService = HabitService<StoreHabitRepository<SharedStore>>;
pub type SharedHabitLogService = HabitLogService<StoreHabitLogRepository<SharedStore>>;

/// Path value that selects an in-memory database.
pub const IN_MEMORY_DB: &str = ":memory:";

/// Services and capabilities handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub habits: Arc<SharedHabitService>,
    pub habit_logs: Arc<SharedHabitLogService>,
    pub tenants: Arc<dyn TenantResolver>,
}

impl AppState {
    /// Wires both services over one store.
    pub fn new(store: SharedStore, tenants: Arc<dyn TenantResolver>) -> Self {
        Self::from_services(
            HabitService::new(StoreHabitRepository::new(store.clone())),
            HabitLogService::new(StoreHabitLogRepository::new(store)),
            tenants,
        )
    }

    /// Uses prebuilt services, e.g. ones with a fixed clock.
    pub fn from_services(
        habits: SharedHabitService,
        habit_logs: SharedHabitLogService,
        tenants: Arc<dyn TenantResolver>,
    ) -> Self {
        Self {
            habits: Arc::new(habits),
            habit_logs: Arc::new(habit_logs),
            tenants,
        }
    }
}

/// Opens the SQLite item store at `path`, or an in-memory one for `:memory:`.
pub fn open_store(path: &Path) -> Result<SharedStore, StoreError> {
    let conn = if path == Path::new(IN_MEMORY_DB) {
        open_db_in_memory()?
    } else {
        open_db(path)?
    };
    Ok(Arc::new(SqliteItemStore::try_new(conn)?))
}
