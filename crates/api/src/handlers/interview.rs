//! Handlers for the `/interviews` resource.

use axum::http::StatusCode;
use axum::Json;
use kiroku_core::error::CoreError;
use kiroku_core::interview::{normalize_keyword, ENTITY_NAME};
use kiroku_core::types::DbId;
use kiroku_db::models::interview::{CreateInterview, Interview, UpdateInterview};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery, Store};
use crate::response::SuccessResponse;

/// Query parameters for `GET /interviews`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub keyword: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_NAME,
        id,
    })
}

/// GET /api/interviews?keyword=
pub async fn list(
    Store(store): Store,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<Vec<Interview>>> {
    let keyword = normalize_keyword(params.keyword.as_deref());
    let interviews = store.list(keyword).await?;
    tracing::debug!(count = interviews.len(), searched = keyword.is_some(), "Listed interviews");
    Ok(Json(interviews))
}

/// POST /api/interviews
pub async fn create(
    Store(store): Store,
    AppJson(input): AppJson<CreateInterview>,
) -> AppResult<(StatusCode, Json<Interview>)> {
    let fields = input.into_fields()?;
    let interview = store.create(&fields).await?;
    tracing::info!(interview_id = interview.id, "Interview created");
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/interviews/{id}
pub async fn get_by_id(
    Store(store): Store,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Interview>> {
    let interview = store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(interview))
}

/// PUT /api/interviews/{id}
pub async fn update(
    Store(store): Store,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateInterview>,
) -> AppResult<Json<Interview>> {
    let fields = input.into_fields()?;
    let interview = store
        .update(id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(interview_id = id, "Interview updated");
    Ok(Json(interview))
}

/// DELETE /api/interviews/{id}
pub async fn delete(
    Store(store): Store,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if store.delete(id).await? {
        tracing::info!(interview_id = id, "Interview deleted");
        Ok(Json(SuccessResponse::ok()))
    } else {
        Err(not_found(id))
    }
}
