//! Liveness endpoint, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// `ok` when the store answers, `degraded` otherwise. The endpoint itself
/// always returns `200` so load balancers can tell "up" from "unhealthy".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Bug report store is unreachable");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// `GET /health`
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
