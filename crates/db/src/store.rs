//! Storage seam for bug reports.
//!
//! [`BugReportStore`] is what the HTTP layer holds. [`PgBugReportStore`] is
//! the production implementation; [`InMemoryBugReportStore`] keeps rows in
//! process memory and is used by tests and local demos.

use async_trait::async_trait;
use bugdesk_core::bug_report::NewBugReport;
use bugdesk_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::bug_report::BugReport;
use crate::repositories::BugReportRepo;
use crate::DbPool;

/// Creates bug reports and reports backend liveness.
#[async_trait]
pub trait BugReportStore: Send + Sync {
    /// Persist a validated report and return it with its assigned id.
    async fn create(&self, input: &NewBugReport) -> Result<BugReport, sqlx::Error>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// Store backed by the `bug_reports` table.
pub struct PgBugReportStore {
    pool: DbPool,
}

impl PgBugReportStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BugReportStore for PgBugReportStore {
    async fn create(&self, input: &NewBugReport) -> Result<BugReport, sqlx::Error> {
        let report = BugReportRepo::create(&self.pool, input).await?;
        tracing::debug!(bug_report_id = report.id, "Inserted bug report row");
        Ok(report)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store. Ids start at 1 and increase by one per insert.
#[derive(Default)]
pub struct InMemoryBugReportStore {
    rows: RwLock<Vec<BugReport>>,
}

impl InMemoryBugReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Snapshot of every stored report, oldest first.
    pub async fn all(&self) -> Vec<BugReport> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl BugReportStore for InMemoryBugReportStore {
    async fn create(&self, input: &NewBugReport) -> Result<BugReport, sqlx::Error> {
        let mut rows = self.rows.write().await;
        let now = chrono::Utc::now();
        let report = BugReport {
            id: rows.len() as DbId + 1,
            title: input.title.clone(),
            description: input.description.clone(),
            severity: input.severity.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        rows.push(report.clone());
        Ok(report)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
