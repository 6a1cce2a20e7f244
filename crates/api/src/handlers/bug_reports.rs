//! Handlers for bug reporting.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use bugdesk_core::bug_report::{self, BugReportSubmission};

use crate::error::{AppError, AppResult};
use crate::response::BugReportCreated;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /bug-reports
// ---------------------------------------------------------------------------

/// Submit a new bug report.
///
/// Validates every field, defaults a missing severity to `medium`, and
/// persists exactly one row. Field failures become a `422` with per-field
/// messages; nothing is stored in that case.
pub async fn submit_bug_report(
    State(state): State<AppState>,
    payload: Result<Json<BugReportSubmission>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let new_report = bug_report::validate_submission(&input).inspect_err(|e| {
        tracing::debug!(error = %e, "Bug report rejected");
    })?;

    let report = state.store.create(&new_report).await?;

    tracing::info!(
        bug_report_id = report.id,
        severity = %report.severity,
        "Bug report submitted",
    );

    Ok((StatusCode::CREATED, Json(BugReportCreated::new(report))))
}
