//! Repository for the `bug_reports` table.

use sqlx::PgPool;
use bugdesk_core::bug_report::NewBugReport;

use crate::models::bug_report::BugReport;

/// Column list for `bug_reports` queries.
const COLUMNS: &str = "id, title, description, severity, created_at, updated_at";

/// Provides the insert operation for bug reports.
pub struct BugReportRepo;

impl BugReportRepo {
    /// Create a new bug report, returning the full row.
    pub async fn create(pool: &PgPool, input: &NewBugReport) -> Result<BugReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO bug_reports (title, description, severity) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugReport>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.severity.as_str())
            .fetch_one(pool)
            .await
    }
}
