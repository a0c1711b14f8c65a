//! In-memory store implementation backing tests, benches and the demo server.

use std::collections::HashMap;

use crate::error::EngineResult;
use crate::models::{DateWindow, DirectoryEntry, ScheduleException, WeeklyExclusion, WorkSchedule};

use super::{EmployeeDirectory, ManualMappingStore, ScheduleStore};

/// A fully in-memory snapshot of collaborator data.
///
/// Filtering mirrors what the real persistence collaborator would do
/// server-side: id-set membership plus date-window overlap.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Work schedule rows.
    pub schedules: Vec<WorkSchedule>,
    /// Schedule exception rows.
    pub exceptions: Vec<ScheduleException>,
    /// Weekly exclusion rows, in authored order.
    pub exclusions: Vec<WeeklyExclusion>,
    /// Employee directory rows.
    pub directory: Vec<DirectoryEntry>,
    /// Manual token → employee-id overrides.
    pub manual_mappings: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryStore {
    fn work_schedules(
        &self,
        employee_ids: &[String],
        window: DateWindow,
    ) -> EngineResult<Vec<WorkSchedule>> {
        Ok(self
            .schedules
            .iter()
            .filter(|s| employee_ids.contains(&s.employee_id) && s.overlaps(window))
            .cloned()
            .collect())
    }

    fn schedule_exceptions(
        &self,
        employee_ids: &[String],
        window: DateWindow,
    ) -> EngineResult<Vec<ScheduleException>> {
        Ok(self
            .exceptions
            .iter()
            .filter(|e| employee_ids.contains(&e.employee_id) && window.contains(e.date))
            .cloned()
            .collect())
    }

    fn weekly_exclusions(
        &self,
        employee_ids: &[String],
        window: DateWindow,
    ) -> EngineResult<Vec<WeeklyExclusion>> {
        Ok(self
            .exclusions
            .iter()
            .filter(|x| employee_ids.contains(&x.employee_id) && x.overlaps(window))
            .cloned()
            .collect())
    }
}

impl EmployeeDirectory for MemoryStore {
    fn active_entries(&self) -> EngineResult<Vec<DirectoryEntry>> {
        Ok(self.directory.clone())
    }
}

impl ManualMappingStore for MemoryStore {
    fn mappings(&self) -> EngineResult<HashMap<String, String>> {
        Ok(self.manual_mappings.clone())
    }
}
