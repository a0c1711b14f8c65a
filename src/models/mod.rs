//! Core data models for the Attendance Evaluation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod punch;
mod schedule;
mod verdict;

pub use employee::{Candidate, DirectoryEntry, IdentityStatus, ResolvedIdentity};
pub use punch::{PunchDetail, RawPunchEntry, parse_clock_time};
pub use schedule::{
    DateWindow, ExclusionMode, PatternDay, RawPatternDay, RawScheduleFields, RawTimeWindow,
    RawWeeklyPattern, ScheduleException, ScheduleType, TimeWindow, WeeklyExclusion, WeeklyPattern,
    WorkSchedule, minute_of_day, weekday_number,
};
pub use verdict::{EmployeeSummary, EvaluatedDay, EvaluationOutcome, ScheduleSource};
