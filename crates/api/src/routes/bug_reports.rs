//! Route definitions for bug reporting.
//!
//! Mounted at `/bug-reports` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::bug_reports;
use crate::state::AppState;

/// Bug report routes.
///
/// ```text
/// POST   /                  -> submit_bug_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(bug_reports::submit_bug_report))
}
