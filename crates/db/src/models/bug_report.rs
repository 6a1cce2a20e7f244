//! Bug report entity model.

use serde::Serialize;
use sqlx::FromRow;
use bugdesk_core::types::{DbId, Timestamp};

/// A row from the `bug_reports` table.
///
/// `severity` is always one of `low`, `medium`, `high`; the table enforces
/// this with a check constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BugReport {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub severity: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
