#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use bugdesk_api::app::build_app;
use bugdesk_api::config::ServerConfig;
use bugdesk_api::state::AppState;
use bugdesk_client::api::HttpBugReportApi;
use bugdesk_client::config::ClientConfig;
use bugdesk_db::store::InMemoryBugReportStore;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_router(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve the real API over an in-memory store.
pub async fn spawn_server() -> (String, Arc<InMemoryBugReportStore>) {
    let store = Arc::new(InMemoryBugReportStore::new());
    let state = AppState {
        store: store.clone(),
        config: Arc::new(ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
        }),
    };
    let base_url = spawn_router(build_app(state)).await;
    (base_url, store)
}

/// HTTP transport pointed at `base_url`.
pub fn api_for(base_url: &str) -> HttpBugReportApi {
    HttpBugReportApi::new(&ClientConfig {
        api_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

/// A base URL on which nothing is listening.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
