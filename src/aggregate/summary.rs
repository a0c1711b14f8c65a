//! Per-employee aggregation of evaluated days.

use std::collections::{BTreeMap, HashSet};

use crate::models::{EmployeeSummary, EvaluatedDay, IdentityStatus};

/// Folds chronologically sorted evaluated days into one summary per
/// distinct resolved employee. Unresolved tokens are grouped separately,
/// one summary per token.
///
/// `coverage` holds the employee ids for which any schedule record existed
/// inside the window; an employee absent from it is reported as having no
/// schedule coverage rather than as compliant.
pub fn summarize(days: &[EvaluatedDay], coverage: &HashSet<String>) -> Vec<EmployeeSummary> {
    // Key space keeps resolved employees and raw tokens apart so an id that
    // happens to equal some token never merges groups.
    let mut groups: BTreeMap<(u8, String), EmployeeSummary> = BTreeMap::new();

    for day in days {
        let key = match &day.employee_id {
            Some(id) => (0u8, id.clone()),
            None => (1u8, day.token.clone()),
        };

        let summary = groups.entry(key).or_insert_with(|| EmployeeSummary {
            employee_id: day.employee_id.clone(),
            employee_name: day.employee_name.clone(),
            token: day.token.clone(),
            identity_status: day.identity_status,
            days_present: 0,
            late_count: 0,
            late_minutes: 0,
            undertime_count: 0,
            undertime_minutes: 0,
            has_schedule_coverage: day
                .employee_id
                .as_ref()
                .is_some_and(|id| coverage.contains(id)),
        });

        if day.punch_count > 0 {
            summary.days_present += 1;
        }
        if day.is_late {
            summary.late_count += 1;
            summary.late_minutes += day.late_minutes;
        }
        if day.is_undertime {
            summary.undertime_count += 1;
            summary.undertime_minutes += day.undertime_minutes;
        }
    }

    groups.into_values().collect()
}
