//! Route definitions for tags.
//!
//! Mounted at `/tags` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes.
///
/// ```text
/// GET    /                   -> list_tags (?search, page, limit)
/// POST   /                   -> create_tag
/// GET    /{id}               -> get_tag
/// PUT    /{id}               -> update_tag
/// DELETE /{id}               -> delete_tag
/// GET    /{id}/notes         -> list_tag_notes (?page, limit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/{id}",
            get(tags::get_tag)
                .put(tags::update_tag)
                .delete(tags::delete_tag),
        )
        .route("/{id}/notes", get(tags::list_tag_notes))
}
