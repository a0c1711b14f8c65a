//! The bio-token parser.
//!
//! Attendance devices report identifiers as free-form strings: typically
//! numeric, sometimes comma-suffixed with free-text annotations, sometimes
//! with stray whitespace or punctuation. The same convention applies to the
//! directory's external-identifier field, which stores a primary token plus
//! annotations (e.g. `"0007,E-2"`). This module centralizes that implicit
//! string contract in one parser type instead of scattering regular
//! expressions across callers.

/// A normalized device token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioToken {
    raw: String,
    normalized: String,
}

impl BioToken {
    /// Parses a raw device token.
    ///
    /// Normalization: take the segment before the first comma, trim it,
    /// strip remaining non-alphanumeric characters, then left-zero-pad
    /// purely numeric tokens to `pad_width` when configured.
    pub fn parse(raw: &str, pad_width: Option<usize>) -> Self {
        let primary = Self::primary_of(raw);
        let stripped: String = primary
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        let normalized = match pad_width {
            Some(width)
                if !stripped.is_empty()
                    && stripped.len() < width
                    && stripped.chars().all(|c| c.is_ascii_digit()) =>
            {
                format!("{stripped:0>width$}")
            }
            _ => stripped,
        };

        BioToken {
            raw: raw.trim().to_string(),
            normalized,
        }
    }

    /// The token as supplied, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized form used for matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True when normalization left nothing to match on.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Extracts the primary token of a comma-annotated field: the segment
    /// before the first comma, trimmed.
    pub fn primary_of(field: &str) -> &str {
        field.split(',').next().unwrap_or("").trim()
    }

    /// Returns true if this token matches a directory external-identifier
    /// field: the field equals the token exactly, or begins with the token
    /// followed by a comma.
    pub fn matches_field(&self, field: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        let primary = Self::primary_of(field);
        primary == self.normalized || primary == self.raw
    }
}
