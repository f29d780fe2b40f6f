use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` (store unreachable) or `unconfigured`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a store connection string is set.
    pub db_configured: bool,
    /// Whether the database answered a trivial query.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state
        .store
        .as_ref()
        .filter(|_| state.config.is_database_configured());

    let (status, db_configured, db_healthy) = match store {
        None => ("unconfigured", false, false),
        Some(store) => match store.health_check().await {
            Ok(()) => ("ok", true, true),
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                ("degraded", true, false)
            }
        },
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_configured,
        db_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
