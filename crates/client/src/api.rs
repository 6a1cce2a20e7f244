//! Transport between the report form and the submission endpoint.
//!
//! [`HttpBugReportApi`] posts the draft as JSON with [`reqwest`] and folds
//! every response into a [`SubmitOutcome`], so the form only ever branches
//! on a closed set of variants.

use std::time::Duration;

use async_trait::async_trait;
use bugdesk_core::bug_report::{FieldErrors, Severity};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Path of the bug report collection, relative to the API base URL.
pub const BUG_REPORTS_PATH: &str = "/api/bug-reports";

/// Request marker sent by XHR-style clients.
const X_REQUESTED_WITH: &str = "X-Requested-With";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/bug-reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// The stored record echoed back in a `201` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedBugReport {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub severity: Severity,
}

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The report was stored. The echoed record is absent when the body
    /// could not be read as one.
    Created(Option<CreatedBugReport>),
    /// The server rejected one or more fields.
    ValidationFailed(FieldErrors),
    /// Anything else: other statuses, unreadable bodies, transport errors.
    Fault(String),
}

#[derive(Deserialize)]
struct CreatedBody {
    bug_report: Option<CreatedBugReport>,
}

#[derive(Deserialize)]
struct ValidationBody {
    errors: FieldErrors,
}

/// Errors raised while setting up the transport.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Sends a submission to the endpoint.
///
/// Implementations never fail: every error is reported as
/// [`SubmitOutcome::Fault`].
#[async_trait]
pub trait BugReportApi: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmitOutcome;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// [`BugReportApi`] over HTTP.
#[derive(Debug)]
pub struct HttpBugReportApi {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpBugReportApi {
    /// Build a client for the endpoint described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let endpoint = config.endpoint();
        let endpoint = reqwest::Url::parse(&endpoint).map_err(|e| ClientError::InvalidUrl {
            url: config.api_url.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The resolved submission URL.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn send(&self, payload: &SubmissionPayload) -> Result<SubmitOutcome, reqwest::Error> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(X_REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(classify_response(status, &body))
    }
}

#[async_trait]
impl BugReportApi for HttpBugReportApi {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmitOutcome {
        let outcome = self
            .send(payload)
            .await
            .unwrap_or_else(|e| SubmitOutcome::Fault(format!("HTTP request failed: {e}")));

        match &outcome {
            SubmitOutcome::Created(report) => {
                tracing::debug!(id = report.as_ref().map(|r| r.id), "Bug report accepted");
            }
            SubmitOutcome::ValidationFailed(errors) => {
                tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Bug report rejected");
            }
            SubmitOutcome::Fault(reason) => {
                tracing::warn!(url = %self.endpoint, reason = %reason, "Bug report submission failed");
            }
        }

        outcome
    }
}

/// Map an HTTP status and body to a [`SubmitOutcome`].
///
/// - any 2xx is `Created`;
/// - 422 with a non-empty `errors` object is `ValidationFailed`;
/// - everything else is `Fault`.
pub fn classify_response(status: StatusCode, body: &[u8]) -> SubmitOutcome {
    if status.is_success() {
        let report = serde_json::from_slice::<CreatedBody>(body)
            .ok()
            .and_then(|b| b.bug_report);
        return SubmitOutcome::Created(report);
    }

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Ok(ValidationBody { errors }) = serde_json::from_slice(body) {
            if !errors.is_empty() {
                return SubmitOutcome::ValidationFailed(errors);
            }
        }
    }

    SubmitOutcome::Fault(format!("Unexpected response status {}", status.as_u16()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
