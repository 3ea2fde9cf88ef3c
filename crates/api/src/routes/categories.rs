//! Route definitions for the category tree.
//!
//! Mounted at `/categories` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes.
///
/// ```text
/// GET    /                   -> list_categories (?flat, page, limit)
/// POST   /                   -> create_category
/// PUT    /reorder            -> reorder_categories
/// GET    /{id}               -> get_category
/// PUT    /{id}               -> update_category
/// DELETE /{id}               -> delete_category (?cascade, force)
/// GET    /{id}/path          -> get_category_path
/// GET    /{id}/notes         -> list_category_notes (?include_subcategories, page, limit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/reorder", put(categories::reorder_categories))
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/{id}/path", get(categories::get_category_path))
        .route("/{id}/notes", get(categories::list_category_notes))
}
