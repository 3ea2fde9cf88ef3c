//! The category tree engine: every category operation the API exposes.
//!
//! The engine owns no state beyond its store handles and never logs; it
//! returns typed [`CoreError`]s and leaves observability to the caller.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use validator::Validate;

use super::guard;
use super::model::{
    Category, CategoryListing, CategoryPatch, Deleted, ListMode, NewCategory, ReorderItem,
};
use super::path::resolve_path;
use super::store::{CategoryFilter, CategoryStore, NoteStore};
use super::tree::{build_tree, sort_categories};
use crate::error::CoreError;
use crate::note::Note;
use crate::pagination::{PageRequest, Paginated};
use crate::types::DbId;

/// Maximum number of reorder updates in flight at once.
pub const REORDER_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct CategoryEngine {
    categories: Arc<dyn CategoryStore>,
    notes: Arc<dyn NoteStore>,
}

impl CategoryEngine {
    pub fn new(categories: Arc<dyn CategoryStore>, notes: Arc<dyn NoteStore>) -> Self {
        Self { categories, notes }
    }

    fn not_found(id: DbId) -> CoreError {
        CoreError::NotFound {
            entity: "Category",
            id,
        }
    }

    /// Create a category after checking parent existence and sibling
    /// uniqueness, in that order.
    pub async fn create(&self, input: NewCategory) -> Result<Category, CoreError> {
        let input = input.normalized();
        input.validate()?;

        guard::ensure_parent_exists(self.categories.as_ref(), input.parent_id).await?;
        guard::ensure_unique_sibling(self.categories.as_ref(), input.parent_id, &input.name, None)
            .await?;

        self.categories.insert(&input).await
    }

    /// Load every category once and shape it as a flat page or a tree.
    pub async fn list(&self, mode: ListMode) -> Result<CategoryListing, CoreError> {
        let mut all = self.categories.find_all().await?;
        sort_categories(&mut all);

        Ok(match mode {
            ListMode::Flat(page) => {
                let total = i64::try_from(all.len()).unwrap_or(i64::MAX);
                CategoryListing::Flat(Paginated::new(page.slice(&all), total, page))
            }
            ListMode::Tree => CategoryListing::Tree(build_tree(&all, None)),
        })
    }

    pub async fn get(&self, id: DbId) -> Result<Category, CoreError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Root-first path to `id`, ending with the category itself.
    pub async fn path(&self, id: DbId) -> Result<Vec<Category>, CoreError> {
        let all = self.categories.find_all().await?;
        resolve_path(&all, id)
    }

    /// Notes filed under `id`, optionally including its direct subcategories.
    pub async fn notes(
        &self,
        id: DbId,
        include_subcategories: bool,
        page: PageRequest,
    ) -> Result<Paginated<Note>, CoreError> {
        self.get(id).await?;

        let mut category_ids = vec![id];
        if include_subcategories {
            let children = self
                .categories
                .find_many(&CategoryFilter::ChildrenOf(id))
                .await?;
            category_ids.extend(children.iter().map(|c| c.id));
        }

        let (notes, total) = self.notes.find_by_category_ids(&category_ids, page).await?;
        Ok(Paginated::new(notes, total, page))
    }

    /// Apply a partial update.
    ///
    /// The self-parent check runs before anything touches the store. When
    /// the parent changes, the new parent must exist and must not be a
    /// descendant of the category. Sibling uniqueness is checked against the
    /// effective `(parent_id, name)` after the patch.
    pub async fn update(&self, id: DbId, patch: CategoryPatch) -> Result<Category, CoreError> {
        guard::ensure_not_self_parent(id, &patch)?;

        let patch = patch.normalized();
        patch.validate()?;

        let existing = self.get(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }

        if let Some(new_parent) = patch.parent_id {
            guard::ensure_parent_exists(self.categories.as_ref(), new_parent).await?;
            if let Some(new_parent) = new_parent {
                let snapshot = self.categories.find_all().await?;
                guard::ensure_not_descendant(&snapshot, id, new_parent)?;
            }
        }

        let mut effective = existing.clone();
        patch.apply_to(&mut effective);
        if effective.name != existing.name || effective.parent_id != existing.parent_id {
            guard::ensure_unique_sibling(
                self.categories.as_ref(),
                effective.parent_id,
                &effective.name,
                Some(id),
            )
            .await?;
        }

        self.categories
            .update_by_id(id, &patch)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Delete a category, refusing when it has children unless `cascade`.
    ///
    /// A cascade removes direct children only. Their own children are left
    /// in place with a parent reference that no longer resolves.
    pub async fn delete(&self, id: DbId, cascade: bool) -> Result<Deleted, CoreError> {
        self.get(id).await?;

        let children = CategoryFilter::ChildrenOf(id);
        let has_children = self.categories.exists(&children).await?;

        if has_children && !cascade {
            return Err(CoreError::HasSubcategories { id });
        }

        let children_deleted = if has_children {
            self.categories.delete_many(&children).await?
        } else {
            0
        };

        let outcome = self.categories.delete_by_id(id).await;
        match (outcome, children_deleted) {
            (Ok(true), _) => Ok(Deleted {
                id,
                children_deleted,
            }),
            (Ok(false), 0) => Err(Self::not_found(id)),
            (Err(err), 0) => Err(err),
            (Ok(false), n) => Err(CoreError::PartialDeleteFailure {
                id,
                children_deleted: n,
                reason: "category disappeared before it could be deleted".to_string(),
            }),
            (Err(err), n) => Err(CoreError::PartialDeleteFailure {
                id,
                children_deleted: n,
                reason: err.to_string(),
            }),
        }
    }

    /// Apply a batch of `(id, order)` updates and return the full collection
    /// in its new order.
    ///
    /// Items are independent and run concurrently. Unknown ids are skipped.
    /// If any update fails, the first error is returned once all updates
    /// have settled.
    pub async fn reorder(&self, updates: Vec<ReorderItem>) -> Result<Vec<Category>, CoreError> {
        if let Some(bad) = updates.iter().find(|item| item.order < 0) {
            return Err(CoreError::Validation(format!(
                "order: must be non-negative (category {} was given {})",
                bad.id, bad.order
            )));
        }

        let results: Vec<Result<Option<Category>, CoreError>> = stream::iter(updates)
            .map(|item| {
                let store = Arc::clone(&self.categories);
                async move { store.update_by_id(item.id, &CategoryPatch::order(item.order)).await }
            })
            .buffer_unordered(REORDER_CONCURRENCY)
            .collect()
            .await;

        for result in results {
            result?;
        }

        let mut all = self.categories.find_all().await?;
        sort_categories(&mut all);
        Ok(all)
    }
}
