//! Handlers for the category tree.
//!
//! Every operation goes through [`CategoryEngine`](notekeeper_core::category::CategoryEngine),
//! which owns validation and the tree invariants. Handlers only translate
//! query strings and log successful mutations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use notekeeper_core::category::{CategoryPatch, ListMode, NewCategory, ReorderItem};
use notekeeper_core::pagination::PageRequest;
use notekeeper_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / body structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /categories`.
#[derive(Debug, Default, Deserialize)]
pub struct ListCategoriesParams {
    /// Return a paginated flat list instead of the tree.
    #[serde(default)]
    pub flat: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListCategoriesParams {
    fn mode(&self) -> ListMode {
        if self.flat {
            ListMode::Flat(PageRequest::from_params(self.page, self.limit))
        } else {
            ListMode::Tree
        }
    }
}

/// Query parameters for `DELETE /categories/{id}`. `force` is an alias of
/// `cascade`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteCategoryParams {
    #[serde(default)]
    pub cascade: bool,
    #[serde(default)]
    pub force: bool,
}

/// Query parameters for `GET /categories/{id}/notes`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryNotesParams {
    #[serde(default)]
    pub include_subcategories: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Body of `PUT /categories/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub orders: Vec<ReorderItem>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<NewCategory>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories.create(input).await?;

    tracing::info!(
        category_id = category.id,
        parent_id = ?category.parent_id,
        name = %category.name,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /categories?flat=&page=&limit=
///
/// The full tree by default; a sorted, paginated flat list with `flat=true`.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListCategoriesParams>,
) -> AppResult<impl IntoResponse> {
    let listing = state.categories.list(params.mode()).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories.get(id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /categories/{id}/path
///
/// Ancestors of the category, root first, ending with the category itself.
pub async fn get_category_path(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let path = state.categories.path(id).await?;
    Ok(Json(DataResponse { data: path }))
}

/// GET /categories/{id}/notes?include_subcategories=&page=&limit=
pub async fn list_category_notes(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<CategoryNotesParams>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest::from_params(params.page, params.limit);
    let notes = state
        .categories
        .notes(id, params.include_subcategories, page)
        .await?;
    Ok(Json(DataResponse { data: notes }))
}

/// PUT /categories/{id}
///
/// Partial update; `parent_id: null` moves the category to the root.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<CategoryPatch>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories.update(id, patch).await?;

    tracing::info!(
        category_id = category.id,
        parent_id = ?category.parent_id,
        "Category updated"
    );

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /categories/{id}?cascade=
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteCategoryParams>,
) -> AppResult<impl IntoResponse> {
    let cascade = params.cascade || params.force;
    let deleted = state.categories.delete(id, cascade).await?;

    tracing::info!(
        category_id = id,
        cascade,
        children_deleted = deleted.children_deleted,
        "Category deleted"
    );

    Ok(Json(DataResponse { data: deleted }))
}

/// PUT /categories/reorder
///
/// Returns every category in its new order.
pub async fn reorder_categories(
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let count = input.orders.len();
    let categories = state.categories.reorder(input.orders).await?;

    tracing::info!(count, "Categories reordered");

    Ok(Json(DataResponse { data: categories }))
}
