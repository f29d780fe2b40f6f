pub mod health;
pub mod interview;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /interviews          list (?keyword=), create
/// /interviews/{id}     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/interviews", interview::router())
}
