//! Evaluation output models: per-day verdicts and per-employee summaries.
//!
//! These are derived, ephemeral rows recomputed per request; the engine
//! never persists them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::employee::{IdentityStatus, ResolvedIdentity};
use super::schedule::ScheduleType;

/// Where the schedule governing a day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// A [`crate::models::ScheduleException`] dated exactly to the day.
    Exception,
    /// A [`crate::models::WorkSchedule`] whose effective range covers the day.
    WorkSchedule,
    /// The hard-coded default schedule (employee known, no matching record,
    /// or the matching record was unreadable).
    Default,
    /// The hard-coded default schedule for an unresolved identity.
    NoMapping,
}

impl std::fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleSource::Exception => write!(f, "EXCEPTION"),
            ScheduleSource::WorkSchedule => write!(f, "WORKSCHEDULE"),
            ScheduleSource::Default => write!(f, "DEFAULT"),
            ScheduleSource::NoMapping => write!(f, "NOMAPPING"),
        }
    }
}

/// One evaluated employee-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedDay {
    /// The device token the punches arrived under.
    pub token: String,
    /// The resolved employee id, when identity resolution succeeded.
    pub employee_id: Option<String>,
    /// Display name of the resolved employee or the unmatched placeholder.
    pub employee_name: Option<String>,
    /// The calendar day evaluated.
    pub date: NaiveDate,
    /// The schedule variant that governed the day.
    pub schedule_type: ScheduleType,
    /// Where the governing schedule came from.
    pub schedule_source: ScheduleSource,
    /// Number of punches recorded for the day after parsing.
    pub punch_count: u32,
    /// Net worked minutes, never negative.
    pub worked_minutes: i64,
    /// Whether the day counts as late.
    pub is_late: bool,
    /// Late magnitude in minutes, 0 when not late.
    pub late_minutes: i64,
    /// Whether the day counts as undertime.
    pub is_undertime: bool,
    /// Undertime magnitude in minutes, 0 when not undertime.
    pub undertime_minutes: i64,
    /// Whether a weekly pattern scoped the day's presence counting.
    pub pattern_applied: bool,
    /// Whether a weekly exclusion altered the day's verdict.
    pub exclusion_applied: bool,
    /// Post-resolution identity status for the token.
    pub identity_status: IdentityStatus,
}

/// Per-employee roll-up over an evaluation window.
///
/// Unresolved tokens are grouped separately, one summary per token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The resolved employee id, or `None` for unresolved tokens.
    pub employee_id: Option<String>,
    /// Display name of the employee or placeholder.
    pub employee_name: Option<String>,
    /// The device token the rows were grouped under.
    pub token: String,
    /// Identity status for the group.
    pub identity_status: IdentityStatus,
    /// Days with at least one recorded punch.
    pub days_present: u32,
    /// Number of late days.
    pub late_count: u32,
    /// Total late minutes.
    pub late_minutes: i64,
    /// Number of undertime days.
    pub undertime_count: u32,
    /// Total undertime minutes.
    pub undertime_minutes: i64,
    /// True when any schedule record existed for the employee during the
    /// window. Distinguishes "no violations because compliant" from "no
    /// violations because nothing was ever configured".
    pub has_schedule_coverage: bool,
}

/// The full result of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    /// One row per employee per date.
    pub per_day: Vec<EvaluatedDay>,
    /// One row per distinct employee (or unresolved token).
    pub per_employee: Vec<EmployeeSummary>,
    /// The pinned token resolutions used for the run, including ambiguous
    /// candidate lists for operator disambiguation.
    pub identities: Vec<ResolvedIdentity>,
}
