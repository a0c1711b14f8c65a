//! Bulk preloading of schedule data for an evaluation window.
//!
//! Evaluating a month of punches for hundreds of employees one row at a
//! time is the primary performance failure mode this engine avoids: the
//! preloader fetches everything overlapping the window in a bounded number
//! of chunked bulk reads and builds per-employee indexes so each day's
//! resolution is a plain map lookup.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{DateWindow, ScheduleException, WeeklyExclusion, WorkSchedule};
use crate::store::ScheduleStore;

/// Maximum number of employee ids per store round-trip.
pub const PRELOAD_CHUNK_SIZE: usize = 200;

/// An indexed in-memory snapshot of all schedule data for one run.
#[derive(Debug, Clone, Default)]
pub struct SchedulePreload {
    /// Schedules per employee, sorted by `effective_from` descending so the
    /// first covering record is the most recently started one.
    schedules: HashMap<String, Vec<WorkSchedule>>,
    /// Exceptions keyed by (employee, date).
    exceptions: HashMap<(String, NaiveDate), ScheduleException>,
    /// Exclusions per employee, kept in stored order.
    exclusions: HashMap<String, Vec<WeeklyExclusion>>,
}

impl SchedulePreload {
    /// An empty snapshot, used when no identities resolved at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetches and indexes everything overlapping `window` for the given
    /// employees. Ids are deduplicated and chunked; the store sees at most
    /// `ceil(n / PRELOAD_CHUNK_SIZE)` round-trips per record kind.
    pub fn load(
        store: &dyn ScheduleStore,
        employee_ids: &[String],
        window: DateWindow,
    ) -> EngineResult<Self> {
        let distinct: Vec<String> = employee_ids
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut preload = SchedulePreload::default();
        for chunk in distinct.chunks(PRELOAD_CHUNK_SIZE) {
            for schedule in store.work_schedules(chunk, window)? {
                preload
                    .schedules
                    .entry(schedule.employee_id.clone())
                    .or_default()
                    .push(schedule);
            }
            for exception in store.schedule_exceptions(chunk, window)? {
                preload
                    .exceptions
                    .insert((exception.employee_id.clone(), exception.date), exception);
            }
            for exclusion in store.weekly_exclusions(chunk, window)? {
                preload
                    .exclusions
                    .entry(exclusion.employee_id.clone())
                    .or_default()
                    .push(exclusion);
            }
        }

        for schedules in preload.schedules.values_mut() {
            schedules.sort_by(|a, b| b.effective_from.cmp(&a.effective_from));
        }

        Ok(preload)
    }

    /// Returns the exception dated exactly to `date`, if any.
    pub fn exception_for(&self, employee_id: &str, date: NaiveDate) -> Option<&ScheduleException> {
        self.exceptions.get(&(employee_id.to_string(), date))
    }

    /// Returns the covering work schedule for `date`, most recently started
    /// first when ranges overlap.
    pub fn schedule_for(&self, employee_id: &str, date: NaiveDate) -> Option<&WorkSchedule> {
        self.schedules
            .get(employee_id)?
            .iter()
            .find(|s| s.covers(date))
    }

    /// Returns the employee's weekly exclusions in stored order.
    pub fn exclusions_for(&self, employee_id: &str) -> &[WeeklyExclusion] {
        self.exclusions
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when any schedule record (schedule or exception) exists for the
    /// employee inside the window. Feeds the summary coverage flag.
    pub fn has_coverage(&self, employee_id: &str) -> bool {
        self.schedules
            .get(employee_id)
            .is_some_and(|s| !s.is_empty())
            || self.exceptions.keys().any(|(id, _)| id == employee_id)
    }
}
