//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code and body. They do NOT need an HTTP server -- they call
//! `IntoResponse` directly on `AppError` values.

use assert_matches::assert_matches;
use axum::response::IntoResponse;
use bugdesk_api::error::AppError;
use bugdesk_core::bug_report::{self, BugReportSubmission, FieldErrors};
use bugdesk_core::error::CoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::InvalidFields maps to 422 with a field map
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_fields_error_returns_422() {
    let mut errors = FieldErrors::new();
    bug_report::push_error(&mut errors, "title", "first");
    bug_report::push_error(&mut errors, "title", "second");

    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidFields(errors))).await;

    assert_eq!(status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "The given data was invalid.");
    assert_eq!(json["errors"]["title"], serde_json::json!(["first", "second"]));
    assert!(json.get("code").is_none());
}

// ---------------------------------------------------------------------------
// Test: validation of a real submission converts through `?`
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submission_validation_error_converts_into_app_error() {
    fn handler_like(input: &BugReportSubmission) -> Result<(), AppError> {
        bug_report::validate_submission(input)?;
        Ok(())
    }

    let err = handler_like(&BugReportSubmission::default()).unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InvalidFields(ref e)) if e.contains_key("title"));

    let (status, _) = error_to_response(err).await;
    assert_eq!(status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: AppError::Database maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_error_returns_500_and_sanitizes_message() {
    let err = AppError::Database(sqlx::Error::Protocol(
        "secret database credentials leaked".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}
