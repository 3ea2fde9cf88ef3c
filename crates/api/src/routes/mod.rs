pub mod categories;
pub mod health;
pub mod notes;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /categories                                      list, create
/// /categories/reorder                              bulk reorder (PUT)
/// /categories/{id}                                 get, update, delete
/// /categories/{id}/path                            root-first ancestry
/// /categories/{id}/notes                           notes in the category
///
/// /notes                                           list, create
/// /notes/search                                    text search
/// /notes/{id}                                      get, update, soft delete
/// /notes/{id}/archive                              archive (PATCH)
/// /notes/{id}/restore                              restore (PATCH)
///
/// /tags                                            list, create
/// /tags/{id}                                       get, update, delete
/// /tags/{id}/notes                                 notes carrying the tag
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/notes", notes::router())
        .nest("/tags", tags::router())
}
