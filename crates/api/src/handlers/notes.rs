//! Handlers for notes.
//!
//! Deleting a note is a soft delete: the row stays with status `deleted` and
//! can be brought back with `restore`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use notekeeper_core::error::CoreError;
use notekeeper_core::note::Note;
use notekeeper_core::pagination::Paginated;
use notekeeper_core::types::DbId;
use notekeeper_db::models::note::{CreateNote, NoteListParams, UpdateNote};
use notekeeper_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Note", id })
}

/// GET /notes?status=&category_id=&tag_id=&page=&limit=
pub async fn list_notes(
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<impl IntoResponse> {
    let (notes, total) = NoteRepo::list(&state.pool, &params).await?;
    let page = Paginated::new(notes, total, params.page_request());
    Ok(Json(DataResponse { data: page }))
}

/// GET /notes/search?q=&page=&limit=
///
/// A missing or blank `q` yields an empty page.
pub async fn search_notes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request();
    let results = match params.term() {
        Some(term) => {
            let (notes, total) = NoteRepo::search(&state.pool, term, page).await?;
            Paginated::new(notes, total, page)
        }
        None => Paginated::<Note>::new(Vec::new(), 0, page),
    };
    Ok(Json(DataResponse { data: results }))
}

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate().map_err(CoreError::from)?;

    let note = NoteRepo::create(&state.pool, &input).await?;

    tracing::info!(
        note_id = note.id,
        category_id = ?note.category_id,
        tag_count = note.tag_ids.len(),
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = NoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: note }))
}

/// PUT /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate().map_err(CoreError::from)?;

    let note = NoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(note_id = note.id, version = note.version, "Note updated");

    Ok(Json(DataResponse { data: note }))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    NoteRepo::soft_delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(note_id = id, "Note soft deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /notes/{id}/archive
pub async fn archive_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = NoteRepo::archive(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(note_id = id, "Note archived");

    Ok(Json(DataResponse { data: note }))
}

/// PATCH /notes/{id}/restore
pub async fn restore_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = NoteRepo::restore(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(note_id = id, "Note restored");

    Ok(Json(DataResponse { data: note }))
}
