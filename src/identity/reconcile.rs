//! Identity reconciliation: mapping raw device tokens to canonical employees.
//!
//! Read-only against the directory and the manual-mapping table. Resolution
//! per token: normalize, consult manual overrides (which always win), then
//! search directory external-identifier fields. Multiple matches rank by
//! most-recently-updated and surface as ambiguity data, never as an error.

use std::collections::HashMap;

use crate::models::{Candidate, DirectoryEntry, IdentityStatus, ResolvedIdentity};

use super::token::BioToken;

/// Reconciles batches of device tokens against a directory snapshot.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    pad_width: Option<usize>,
}

impl Reconciler {
    /// Creates a reconciler, optionally zero-padding numeric tokens to the
    /// given width before matching.
    pub fn new(pad_width: Option<usize>) -> Self {
        Reconciler { pad_width }
    }

    /// Resolves every token in `tokens` against the directory snapshot and
    /// override map. The returned map is keyed by the raw token string and
    /// is pinned for the lifetime of the evaluation run.
    pub fn reconcile(
        &self,
        tokens: &[String],
        directory: &[DirectoryEntry],
        overrides: &HashMap<String, String>,
    ) -> HashMap<String, ResolvedIdentity> {
        let mut resolved = HashMap::with_capacity(tokens.len());
        for token in tokens {
            resolved
                .entry(token.clone())
                .or_insert_with(|| self.resolve_one(token, directory, overrides));
        }
        resolved
    }

    /// Resolves a single token.
    pub fn resolve_one(
        &self,
        raw: &str,
        directory: &[DirectoryEntry],
        overrides: &HashMap<String, String>,
    ) -> ResolvedIdentity {
        let token = BioToken::parse(raw, self.pad_width);
        if token.is_empty() {
            return ResolvedIdentity::unmatched(raw, token.normalized());
        }

        // Manual overrides always win over automatic matching.
        if let Some(employee_id) = overrides
            .get(token.normalized())
            .or_else(|| overrides.get(token.raw()))
        {
            let entry = directory.iter().find(|e| &e.id == employee_id);
            let candidates: Vec<Candidate> = entry.map(Candidate::from_entry).into_iter().collect();
            return ResolvedIdentity {
                token: raw.to_string(),
                normalized_token: token.normalized().to_string(),
                status: IdentityStatus::Matched,
                employee_id: Some(employee_id.clone()),
                display_name: entry.map(|e| e.full_name.trim().to_string()),
                candidates,
            };
        }

        let mut candidates: Vec<Candidate> = directory
            .iter()
            .filter(|e| token.matches_field(&e.bio_field))
            .map(Candidate::from_entry)
            .collect();

        match candidates.len() {
            0 => ResolvedIdentity::unmatched(raw, token.normalized()),
            1 => {
                let primary = candidates[0].clone();
                ResolvedIdentity {
                    token: raw.to_string(),
                    normalized_token: token.normalized().to_string(),
                    status: IdentityStatus::Matched,
                    employee_id: Some(primary.employee_id),
                    display_name: Some(primary.display_name),
                    candidates,
                }
            }
            _ => {
                // Most-recently-updated first; employee id breaks ties so
                // repeated runs order candidates identically.
                candidates.sort_by(|a, b| {
                    b.updated_at
                        .cmp(&a.updated_at)
                        .then_with(|| a.employee_id.cmp(&b.employee_id))
                });
                let primary = candidates[0].clone();
                ResolvedIdentity {
                    token: raw.to_string(),
                    normalized_token: token.normalized().to_string(),
                    status: IdentityStatus::Ambiguous,
                    employee_id: Some(primary.employee_id),
                    display_name: Some(primary.display_name),
                    candidates,
                }
            }
        }
    }
}
