pub mod bug_reports;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /bug-reports                                     submit (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/bug-reports", bug_reports::router())
}
