use std::net::SocketAddr;
use std::sync::Arc;

use kiroku_db::pool::PoolProvider;
use kiroku_db::store::{InterviewStore, PgInterviewStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kiroku_api::app::build_app;
use kiroku_api::config::ServerConfig;
use kiroku_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = %config.port,
        db_configured = config.is_database_configured(),
        "Loaded server configuration"
    );

    // --- Database ---
    let provider = config
        .database_url
        .as_deref()
        .map(|url| Arc::new(PoolProvider::new(url, config.pool)));

    match &provider {
        Some(provider) if config.run_migrations => bootstrap_database(provider).await,
        Some(_) => tracing::info!("Skipping migrations (RUN_MIGRATIONS=false)"),
        None => tracing::warn!("DATABASE_URL is not set; interview routes will answer 503"),
    }

    let store = provider
        .clone()
        .map(|p| Arc::new(PgInterviewStore::new(p)) as Arc<dyn InterviewStore>);

    // --- App state ---
    let addr = SocketAddr::new(config.host, config.port);
    let state = AppState::new(config, store);

    // --- Router ---
    let app = build_app(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(provider) = provider {
        provider.teardown().await;
    }

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` selects JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kiroku_api=debug,kiroku_db=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Check connectivity and apply migrations.
///
/// Failures are logged, not fatal: the server still starts so `/health`
/// can report the problem.
async fn bootstrap_database(provider: &PoolProvider) {
    let pool = match provider.pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Invalid DATABASE_URL");
            return;
        }
    };

    if let Err(e) = kiroku_db::health_check(&pool).await {
        tracing::error!(error = %e, "Database health check failed");
        return;
    }
    tracing::info!("Database health check passed");

    match kiroku_db::run_migrations(&pool).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::error!(error = %e, "Failed to run database migrations"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
