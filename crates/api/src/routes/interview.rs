//! Route definitions for the `/interviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::interview;
use crate::state::AppState;

/// Routes mounted at `/interviews`.
///
/// ```text
/// GET    /        -> list (optional ?keyword=)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(interview::list).post(interview::create))
        .route(
            "/{id}",
            get(interview::get_by_id)
                .put(interview::update)
                .delete(interview::delete),
        )
}
