use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bugdesk_api::app::build_app;
use bugdesk_api::config::{ConfigError, ServerConfig};
use bugdesk_api::state::AppState;
use bugdesk_db::store::PgBugReportStore;
use bugdesk_db::DbPool;

/// Anything that stops the server before it starts accepting requests.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("Invalid HOST address '{0}'")]
    InvalidHost(String),

    #[error("Database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| StartupError::MissingDatabaseUrl)?;
    let pool = prepare_database(&database_url).await?;

    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .map_err(|_| StartupError::InvalidHost(config.host.clone()))?,
        config.port,
    );
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    let app = build_app(AppState {
        store: Arc::new(PgBugReportStore::new(pool.clone())),
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Accepting bug reports");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database pool");
    if tokio::time::timeout(shutdown_timeout, pool.close())
        .await
        .is_err()
    {
        tracing::warn!("Timed out waiting for database connections to close");
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bugdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, check liveness, and bring the schema up to date.
async fn prepare_database(database_url: &str) -> Result<DbPool, StartupError> {
    let pool = bugdesk_db::create_pool(database_url).await?;
    bugdesk_db::health_check(&pool).await?;
    tracing::info!("Database connection pool ready");

    bugdesk_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
