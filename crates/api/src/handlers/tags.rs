//! Handlers for tags.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use notekeeper_core::error::CoreError;
use notekeeper_core::pagination::Paginated;
use notekeeper_core::types::DbId;
use notekeeper_db::models::tag::{CreateTag, TagListParams, UpdateTag};
use notekeeper_db::repositories::{NoteRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Tag", id })
}

/// GET /tags?search=&page=&limit=
pub async fn list_tags(
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> AppResult<impl IntoResponse> {
    let (tags, total) = TagRepo::list(&state.pool, &params).await?;
    let page = Paginated::new(tags, total, params.page_request());
    Ok(Json(DataResponse { data: page }))
}

/// POST /tags
pub async fn create_tag(
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate().map_err(CoreError::from)?;

    let tag = TagRepo::create(&state.pool, &input).await?;

    tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tag = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: tag }))
}

/// PUT /tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTag>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate().map_err(CoreError::from)?;

    let tag = TagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(tag_id = tag.id, "Tag updated");

    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /tags/{id}
///
/// Also detaches the tag from every note that carried it.
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TagRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(tag_id = id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /tags/{id}/notes?page=&limit=
pub async fn list_tag_notes(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let page = params.page_request();
    let (notes, total) = NoteRepo::find_by_tag(&state.pool, id, page).await?;
    Ok(Json(DataResponse {
        data: Paginated::new(notes, total, page),
    }))
}
