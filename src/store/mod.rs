//! Collaborator read-interfaces consumed by the engine.
//!
//! The engine never writes master data; it reads schedules, exceptions,
//! exclusions, the employee directory and manual token mappings through the
//! traits below. Implementations are expected to serve each call as a single
//! bulk read; the bulk preloader chunks its id-sets so no call carries an
//! unbounded identifier list. A collaborator failure is fatal for the run
//! and must surface as [`crate::error::EngineError::StoreUnavailable`].

mod memory;

use std::collections::HashMap;

use crate::error::EngineResult;
use crate::models::{DateWindow, DirectoryEntry, ScheduleException, WeeklyExclusion, WorkSchedule};

pub use memory::MemoryStore;

/// Read access to schedule master data.
pub trait ScheduleStore: Send + Sync {
    /// Returns all work schedules for the given employees whose effective
    /// range overlaps `window`.
    fn work_schedules(
        &self,
        employee_ids: &[String],
        window: DateWindow,
    ) -> EngineResult<Vec<WorkSchedule>>;

    /// Returns all schedule exceptions for the given employees dated inside
    /// `window`.
    fn schedule_exceptions(
        &self,
        employee_ids: &[String],
        window: DateWindow,
    ) -> EngineResult<Vec<ScheduleException>>;

    /// Returns all weekly exclusions for the given employees whose effective
    /// range overlaps `window`, in stored order.
    fn weekly_exclusions(
        &self,
        employee_ids: &[String],
        window: DateWindow,
    ) -> EngineResult<Vec<WeeklyExclusion>>;
}

/// Read access to the employee directory.
pub trait EmployeeDirectory: Send + Sync {
    /// Returns all active directory entries in one bulk read.
    fn active_entries(&self) -> EngineResult<Vec<DirectoryEntry>>;
}

/// Read access to the manual token-override mapping table.
pub trait ManualMappingStore: Send + Sync {
    /// Returns the full token → employee-id override map.
    fn mappings(&self) -> EngineResult<HashMap<String, String>>;
}
