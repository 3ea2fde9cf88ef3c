//! Route definitions for notes.
//!
//! Mounted at `/notes` by `api_routes()`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Note routes.
///
/// ```text
/// GET    /                   -> list_notes (?status, category_id, tag_id, page, limit)
/// POST   /                   -> create_note
/// GET    /search             -> search_notes (?q, page, limit)
/// GET    /{id}               -> get_note
/// PUT    /{id}               -> update_note
/// DELETE /{id}               -> delete_note (soft)
/// PATCH  /{id}/archive       -> archive_note
/// PATCH  /{id}/restore       -> restore_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route("/search", get(notes::search_notes))
        .route(
            "/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/{id}/archive", patch(notes::archive_note))
        .route("/{id}/restore", patch(notes::restore_note))
}
