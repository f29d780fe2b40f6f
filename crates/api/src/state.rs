use std::sync::Arc;

use kiroku_db::store::InterviewStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, fixed at startup.
    pub config: Arc<ServerConfig>,
    /// Interview store. Only reachable through the [`crate::extract::Store`]
    /// gate, which also requires `config.database_url` to be set.
    pub store: Option<Arc<dyn InterviewStore>>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Option<Arc<dyn InterviewStore>>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
