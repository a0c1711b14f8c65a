//! Batch evaluation: the run that ties identity reconciliation, schedule
//! resolution, day evaluation and aggregation together.
//!
//! One run is a pure computation over a fully preloaded snapshot: the
//! directory, the manual mappings and the schedule data are each fetched in
//! bulk up front, then every employee-day is evaluated without further I/O.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{info, warn};

use crate::aggregate::summarize;
use crate::error::EngineResult;
use crate::identity::Reconciler;
use crate::models::{
    DateWindow, EvaluatedDay, EvaluationOutcome, IdentityStatus, RawPunchEntry, ResolvedIdentity,
};
use crate::resolve::{SchedulePreload, effective_exclusion, resolve_schedule};
use crate::store::{EmployeeDirectory, ManualMappingStore, ScheduleStore};

use super::day::evaluate_day;

/// Engine-level knobs for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Zero-pad numeric tokens to this width before matching.
    pub token_pad_width: Option<usize>,
}

/// Evaluates a batch of punch entries against the schedule snapshot for
/// `window`.
///
/// Entries dated outside the window are skipped (their schedule data was
/// never preloaded). Token resolutions are pinned once at the start of the
/// run; per-entry identity hints from an earlier pass take precedence over
/// fresh reconciliation.
pub fn evaluate_batch(
    schedule_store: &dyn ScheduleStore,
    directory: &dyn EmployeeDirectory,
    mappings: &dyn ManualMappingStore,
    entries: &[RawPunchEntry],
    window: DateWindow,
    options: &EngineOptions,
) -> EngineResult<EvaluationOutcome> {
    let directory_entries = directory.active_entries()?;
    let overrides = mappings.mappings()?;

    let tokens: Vec<String> = entries
        .iter()
        .map(|e| e.employee_token.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let reconciler = Reconciler::new(options.token_pad_width);
    let identities = reconciler.reconcile(&tokens, &directory_entries, &overrides);

    // Every id that can govern a schedule lookup: reconciled primaries plus
    // pre-resolved hints.
    let mut employee_ids: BTreeSet<String> = identities
        .values()
        .filter_map(|i| i.employee_id.clone())
        .collect();
    employee_ids.extend(entries.iter().filter_map(|e| e.employee_id.clone()));
    let employee_ids: Vec<String> = employee_ids.into_iter().collect();

    let preload = SchedulePreload::load(schedule_store, &employee_ids, window)?;

    let names_by_id: HashMap<&str, &str> = directory_entries
        .iter()
        .map(|e| (e.id.as_str(), e.full_name.trim()))
        .collect();

    let mut ordered: Vec<&RawPunchEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| {
        a.employee_token
            .cmp(&b.employee_token)
            .then_with(|| a.date.cmp(&b.date))
    });

    let mut per_day: Vec<EvaluatedDay> = Vec::with_capacity(ordered.len());
    let mut skipped = 0usize;

    for entry in ordered {
        if !window.contains(entry.date) {
            skipped += 1;
            continue;
        }

        let identity = identities.get(&entry.employee_token);
        let (employee_id, employee_name, status) = match (&entry.employee_id, identity) {
            // An identity hint from an earlier pass stays pinned.
            (Some(id), _) => (
                Some(id.clone()),
                names_by_id.get(id.as_str()).map(|n| n.to_string()),
                IdentityStatus::Matched,
            ),
            (None, Some(identity)) => (
                identity.employee_id.clone(),
                identity.display_name.clone(),
                identity.status,
            ),
            (None, None) => (None, None, IdentityStatus::Unmatched),
        };

        let resolved = resolve_schedule(&preload, employee_id.as_deref(), entry.date);
        let exclusion = employee_id
            .as_deref()
            .and_then(|id| effective_exclusion(preload.exclusions_for(id), entry.date));

        let times = entry.sorted_times();
        let verdict = evaluate_day(
            entry.date,
            &times,
            &resolved.kind,
            exclusion.map(|x| &x.mode),
        );

        per_day.push(EvaluatedDay {
            token: entry.employee_token.clone(),
            employee_id,
            employee_name,
            date: entry.date,
            schedule_type: resolved.kind.schedule_type(),
            schedule_source: resolved.source,
            punch_count: times.len() as u32,
            worked_minutes: verdict.worked_minutes,
            is_late: verdict.is_late,
            late_minutes: verdict.late_minutes,
            is_undertime: verdict.is_undertime,
            undertime_minutes: verdict.undertime_minutes,
            pattern_applied: verdict.pattern_applied,
            exclusion_applied: verdict.exclusion_applied,
            identity_status: status,
        });
    }

    if skipped > 0 {
        warn!(skipped, "dropped punch entries dated outside the window");
    }

    let coverage: HashSet<String> = employee_ids
        .iter()
        .filter(|id| preload.has_coverage(id))
        .cloned()
        .collect();
    let per_employee = summarize(&per_day, &coverage);

    let mut identity_rows: Vec<ResolvedIdentity> = identities.into_values().collect();
    identity_rows.sort_by(|a, b| a.token.cmp(&b.token));

    info!(
        entries = per_day.len(),
        employees = per_employee.len(),
        tokens = identity_rows.len(),
        "evaluation run complete"
    );

    Ok(EvaluationOutcome {
        per_day,
        per_employee,
        identities: identity_rows,
    })
}
