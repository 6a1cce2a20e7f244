//! Client-side connection settings.

use crate::api::BUG_REPORTS_PATH;

/// Default API base URL for local development.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how the client reaches the submission endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, e.g. `http://localhost:3000`.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Full URL of the bug report collection.
    pub fn endpoint(&self) -> String {
        format!("{}{BUG_REPORTS_PATH}", self.api_url.trim_end_matches('/'))
    }
}
