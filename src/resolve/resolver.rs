//! Effective-schedule resolution for one employee-day.

use chrono::NaiveDate;

use crate::models::ScheduleSource;

use super::normalize::{ScheduleKind, default_fixed, normalize};
use super::preload::SchedulePreload;

/// The schedule that governs one employee-day, with its declared source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchedule {
    /// The normalized schedule.
    pub kind: ScheduleKind,
    /// Where it came from.
    pub source: ScheduleSource,
}

/// Resolves the single schedule governing `date` for the given employee.
///
/// Resolution order: an exception dated exactly to the day, then the
/// covering work schedule (most recently started wins on overlap), then the
/// hard-coded default tagged `Default` for known employees or `NoMapping`
/// when the identity itself is unresolved. A matching record whose stored
/// fields are unreadable also resolves to the default with source `Default`.
pub fn resolve_schedule(
    preload: &SchedulePreload,
    employee_id: Option<&str>,
    date: NaiveDate,
) -> ResolvedSchedule {
    let Some(employee_id) = employee_id else {
        return ResolvedSchedule {
            kind: default_fixed(),
            source: ScheduleSource::NoMapping,
        };
    };

    if let Some(exception) = preload.exception_for(employee_id, date) {
        let normalized = normalize(exception.schedule_type, &exception.fields);
        return ResolvedSchedule {
            kind: normalized.kind,
            source: if normalized.degraded {
                ScheduleSource::Default
            } else {
                ScheduleSource::Exception
            },
        };
    }

    if let Some(schedule) = preload.schedule_for(employee_id, date) {
        let normalized = normalize(schedule.schedule_type, &schedule.fields);
        return ResolvedSchedule {
            kind: normalized.kind,
            source: if normalized.degraded {
                ScheduleSource::Default
            } else {
                ScheduleSource::WorkSchedule
            },
        };
    }

    ResolvedSchedule {
        kind: default_fixed(),
        source: ScheduleSource::Default,
    }
}
