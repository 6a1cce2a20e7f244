//! Bug report field rules, severity levels, and user-facing messages.
//!
//! The server validates every submission with [`validate_submission`]. The
//! client mirrors only the title presence check ([`title_is_present`]) before
//! sending anything, and renders the same message strings.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_SEVERITY: &str = "severity";

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length for the title field, counted in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// All valid severity values, in display order.
pub const VALID_SEVERITIES: &[&str] = &["low", "medium", "high"];

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Shown by the form when the title is blank at submit time.
pub const MSG_TITLE_REQUIRED_LOCAL: &str = "Title is required.";
pub const MSG_TITLE_REQUIRED: &str = "The title field is required.";
pub const MSG_TITLE_TOO_LONG: &str = "The title must not be greater than 100 characters.";
pub const MSG_SEVERITY_INVALID: &str = "The selected severity is invalid.";

/// Top-level `message` of a `201` response.
pub const MSG_REPORT_CREATED: &str = "Bug reported successfully!";
/// Top-level `message` of a `422` response.
pub const MSG_VALIDATION_FAILED: &str = "The given data was invalid.";

/// Success banner rendered by the form.
pub const MSG_SUCCESS: &str = "Bug reported!";
/// General error banner rendered by the form.
pub const MSG_GENERAL_ERROR: &str = "An error occurred. Please try again.";

pub const LABEL_SUBMIT: &str = "Report Bug";
pub const LABEL_SUBMITTING: &str = "Submitting...";

/// Per-field validation messages, keyed by field name.
///
/// Ordered so serialized `errors` payloads are deterministic.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How badly a bug affects the user. Defaults to [`Severity::Medium`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    /// Every severity, in display order.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// The wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Human-readable option label for a select control.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid severity '{0}'. Must be one of: {VALID_SEVERITIES:?}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Submission DTOs
// ---------------------------------------------------------------------------

/// A submission exactly as received over the wire.
///
/// Every field is optional here so that a missing title surfaces as a field
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BugReportSubmission {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
}

/// A validated submission, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBugReport {
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Client-side pre-flight rule: the title must be non-blank.
pub fn title_is_present(title: &str) -> bool {
    !title.trim().is_empty()
}

/// Validate a title, returning the trimmed value.
pub fn validate_title(title: &str) -> Result<&str, &'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(MSG_TITLE_REQUIRED);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(MSG_TITLE_TOO_LONG);
    }
    Ok(trimmed)
}

/// Resolve an optional severity string.
///
/// Absent or blank values fall back to [`Severity::Medium`].
pub fn parse_severity(raw: Option<&str>) -> Result<Severity, &'static str> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Severity::default()),
        Some(s) => s.parse().map_err(|_| MSG_SEVERITY_INVALID),
    }
}

/// Validate a raw submission and normalize it for storage.
///
/// Title and description are trimmed; a blank description becomes `None`.
/// Every failing field is reported, not just the first one.
pub fn validate_submission(input: &BugReportSubmission) -> Result<NewBugReport, CoreError> {
    let title = validate_title(input.title.as_deref().unwrap_or_default());
    let severity = parse_severity(input.severity.as_deref());

    match (title, severity) {
        (Ok(title), Ok(severity)) => Ok(NewBugReport {
            title: title.to_string(),
            description: input
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(ToOwned::to_owned),
            severity,
        }),
        (title, severity) => {
            let mut errors = FieldErrors::new();
            if let Err(msg) = title {
                push_error(&mut errors, FIELD_TITLE, msg);
            }
            if let Err(msg) = severity {
                push_error(&mut errors, FIELD_SEVERITY, msg);
            }
            Err(CoreError::InvalidFields(errors))
        }
    }
}

/// Append `message` to the list for `field`.
pub fn push_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
