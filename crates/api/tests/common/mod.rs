#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use bugdesk_core::bug_report::NewBugReport;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bugdesk_api::app::build_app;
use bugdesk_api::config::ServerConfig;
use bugdesk_api::state::AppState;
use bugdesk_db::models::bug_report::BugReport;
use bugdesk_db::store::BugReportStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<dyn BugReportStore>) -> Router {
    build_app(AppState {
        store,
        config: Arc::new(test_config()),
    })
}

/// A store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl BugReportStore for FailingStore {
    async fn create(&self, _input: &NewBugReport) -> Result<BugReport, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, the way the report form does.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

/// Send a POST request with an arbitrary body labelled as JSON.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-requested-with", "XMLHttpRequest")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
