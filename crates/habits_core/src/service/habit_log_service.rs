//! Habit log use-case service.
//!
//! Mirrors the habit service with `habit_id`, `date` and `note` as the
//! overwritten fields. Logs may reference habits that do not exist.

use super::{new_entity_id, system_clock, Clock, ServiceResult};
use crate::model::habit_log::{HabitLog, HabitLogRequest};
use crate::repo::habit_log_repo::HabitLogRepository;
use log::info;

/// Habit log service facade over repository implementations.
pub struct HabitLogService<R: HabitLogRepository> {
    repo: R,
    clock: Clock,
}

impl<R: HabitLogRepository> HabitLogService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, system_clock)
    }

    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self { repo, clock }
    }

    pub fn create_habit_log(
        &self,
        tenant_id: &str,
        request: &HabitLogRequest,
    ) -> ServiceResult<HabitLog> {
        let log = HabitLog::from_request(new_entity_id(), request, (self.clock)());
        self.repo.create_habit_log(tenant_id, &log)?;
        info!(
            "event=habit_log_create module=service status=ok tenant_id={} log_id={} habit_id={}",
            tenant_id, log.id, log.habit_id
        );
        Ok(log)
    }

    pub fn list_habit_logs(&self, tenant_id: &str) -> ServiceResult<Vec<HabitLog>> {
        Ok(self.repo.list_habit_logs(tenant_id)?)
    }

    pub fn find_habit_log(&self, tenant_id: &str, log_id: &str) -> ServiceResult<HabitLog> {
        Ok(self.repo.find_habit_log_by_id(tenant_id, log_id)?)
    }

    pub fn update_habit_log(
        &self,
        tenant_id: &str,
        log_id: &str,
        request: &HabitLogRequest,
    ) -> ServiceResult<HabitLog> {
        let mut log = self.repo.find_habit_log_by_id(tenant_id, log_id)?;
        log.apply(request, (self.clock)());
        self.repo.update_habit_log(tenant_id, log_id, &log)?;
        Ok(log)
    }

    pub fn delete_habit_log(&self, tenant_id: &str, log_id: &str) -> ServiceResult<()> {
        Ok(self.repo.delete_habit_log(tenant_id, log_id)?)
    }
}
