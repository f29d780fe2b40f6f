//! Request extractors shared by the interview handlers.
//!
//! [`Store`] is the precondition gate: declared as the first handler
//! argument, it rejects with 503 before any path, query or body is parsed,
//! and before the store can be reached. The `App*` wrappers turn axum's
//! plain-text rejections into [`AppError`] JSON bodies.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use kiroku_db::store::InterviewStore;

use crate::error::AppError;
use crate::state::AppState;

/// The interview store, available only when a connection string is configured.
///
/// ```ignore
/// async fn handler(Store(store): Store) -> AppResult<Json<Vec<Interview>>> {
///     Ok(Json(store.list(None).await?))
/// }
/// ```
pub struct Store(pub Arc<dyn InterviewStore>);

impl FromRequestParts<AppState> for Store {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.is_database_configured() {
            return Err(AppError::NotConfigured);
        }
        state
            .store
            .as_ref()
            .map(|store| Store(Arc::clone(store)))
            .ok_or(AppError::NotConfigured)
    }
}

/// `axum::Json` with JSON error bodies on rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with JSON error bodies on rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `axum::extract::Query` with JSON error bodies on rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
