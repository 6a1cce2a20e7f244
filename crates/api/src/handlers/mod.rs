//! Request handlers.
//!
//! Handlers validate through `bugdesk_core`, persist through the
//! [`BugReportStore`](bugdesk_db::store::BugReportStore) held in
//! [`AppState`](crate::state::AppState), and map errors via
//! [`AppError`](crate::error::AppError).

pub mod bug_reports;
