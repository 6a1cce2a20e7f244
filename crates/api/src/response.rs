//! Response bodies for API handlers.

use bugdesk_core::bug_report::MSG_REPORT_CREATED;
use bugdesk_db::models::bug_report::BugReport;
use serde::Serialize;

/// Body of a `201 Created` bug report submission.
///
/// ```json
/// { "message": "Bug reported successfully!", "bug_report": { "id": 1, ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct BugReportCreated {
    pub message: &'static str,
    pub bug_report: BugReport,
}

impl BugReportCreated {
    pub fn new(bug_report: BugReport) -> Self {
        Self {
            message: MSG_REPORT_CREATED,
            bug_report,
        }
    }
}
