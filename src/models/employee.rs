//! Employee directory entries and identity resolution results.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An employee-directory row as read from the directory collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Canonical employee identifier.
    pub id: String,
    /// Formatted full name.
    pub full_name: String,
    /// The external-identifier ("bio") field. By convention this stores the
    /// primary device token, optionally followed by a comma and free-text
    /// annotations (e.g. `"0007,E-2"`).
    pub bio_field: String,
    /// The office the employee belongs to.
    #[serde(default)]
    pub office: Option<String>,
    /// Last update timestamp, used to rank ambiguous matches.
    pub updated_at: NaiveDateTime,
}

/// Outcome status of reconciling one device token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStatus {
    /// Exactly one canonical employee matched.
    Matched,
    /// Multiple active employees share the normalized token; the
    /// most-recently-updated one is chosen as primary.
    Ambiguous,
    /// No employee matched; the placeholder identity is used.
    Unmatched,
}

/// A candidate employee for an ambiguous token, retained for manual
/// disambiguation by an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Canonical employee identifier.
    pub employee_id: String,
    /// Formatted name for display.
    pub display_name: String,
    /// Office for display.
    #[serde(default)]
    pub office: Option<String>,
    /// Directory update timestamp used for ranking.
    pub updated_at: NaiveDateTime,
}

impl Candidate {
    /// Builds a candidate from a directory entry.
    pub fn from_entry(entry: &DirectoryEntry) -> Self {
        Candidate {
            employee_id: entry.id.clone(),
            display_name: entry.full_name.trim().to_string(),
            office: entry.office.clone(),
            updated_at: entry.updated_at,
        }
    }
}

/// The resolution result for one device token, pinned for the lifetime of an
/// evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    /// The raw token as supplied.
    pub token: String,
    /// The normalized form actually used for matching.
    pub normalized_token: String,
    /// Resolution status.
    pub status: IdentityStatus,
    /// The primary employee id, when matched or ambiguous.
    pub employee_id: Option<String>,
    /// The primary display name, when matched or ambiguous.
    pub display_name: Option<String>,
    /// All candidates for ambiguous tokens, ranked most-recently-updated
    /// first. Contains the single match for `Matched`, empty for `Unmatched`.
    pub candidates: Vec<Candidate>,
}

impl ResolvedIdentity {
    /// The fixed placeholder used for tokens that match nobody.
    pub fn unmatched(token: &str, normalized: &str) -> Self {
        ResolvedIdentity {
            token: token.to_string(),
            normalized_token: normalized.to_string(),
            status: IdentityStatus::Unmatched,
            employee_id: None,
            display_name: Some(format!("Unknown ({token})")),
            candidates: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry() -> DirectoryEntry {
        DirectoryEntry {
            id: "emp_001".to_string(),
            full_name: "  Reyes, Ana  ".to_string(),
            bio_field: "0007,E-2".to_string(),
            office: Some("Records".to_string()),
            updated_at: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_candidate_trims_display_name() {
        let candidate = Candidate::from_entry(&entry());
        assert_eq!(candidate.display_name, "Reyes, Ana");
        assert_eq!(candidate.office.as_deref(), Some("Records"));
    }

    #[test]
    fn test_unmatched_placeholder() {
        let identity = ResolvedIdentity::unmatched("9999", "9999");
        assert_eq!(identity.status, IdentityStatus::Unmatched);
        assert!(identity.employee_id.is_none());
        assert_eq!(identity.display_name.as_deref(), Some("Unknown (9999)"));
        assert!(identity.candidates.is_empty());
    }

    #[test]
    fn test_identity_status_serialization() {
        let json = serde_json::to_string(&IdentityStatus::Ambiguous).unwrap();
        assert_eq!(json, "\"ambiguous\"");
    }
}
