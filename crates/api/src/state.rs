use std::sync::Arc;

use bugdesk_db::store::BugReportStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Bug report persistence.
    pub store: Arc<dyn BugReportStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
