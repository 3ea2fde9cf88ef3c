//! Invariant checks run before every category mutation.
//!
//! These are fast-path checks that give precise errors. Concurrent requests
//! can still race between a check and the write; the store's uniqueness
//! constraint is the authoritative guard for sibling names.

use super::model::{Category, CategoryPatch};
use super::path::CategoryIndex;
use super::store::{CategoryFilter, CategoryStore};
use crate::error::CoreError;
use crate::types::DbId;

/// Reject a patch that would make a category its own parent.
pub fn ensure_not_self_parent(id: DbId, patch: &CategoryPatch) -> Result<(), CoreError> {
    if patch.parent_id == Some(Some(id)) {
        return Err(CoreError::InvalidParent(
            "Category cannot be its own parent".to_string(),
        ));
    }
    Ok(())
}

/// Reject a non-null parent reference that does not resolve.
pub async fn ensure_parent_exists(
    store: &dyn CategoryStore,
    parent_id: Option<DbId>,
) -> Result<(), CoreError> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    match store.find_by_id(parent_id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::ParentNotFound { parent_id }),
    }
}

/// Reject moving `id` underneath one of its own descendants.
pub fn ensure_not_descendant(
    snapshot: &[Category],
    id: DbId,
    new_parent_id: DbId,
) -> Result<(), CoreError> {
    let index = CategoryIndex::new(snapshot);
    if index.is_descendant_of(new_parent_id, id)? {
        return Err(CoreError::InvalidParent(format!(
            "Category {new_parent_id} is a descendant of category {id}"
        )));
    }
    Ok(())
}

/// Reject a `(parent_id, name)` pair already taken by another category.
pub async fn ensure_unique_sibling(
    store: &dyn CategoryStore,
    parent_id: Option<DbId>,
    name: &str,
    excluding: Option<DbId>,
) -> Result<(), CoreError> {
    let filter = CategoryFilter::Sibling {
        parent_id,
        name: name.to_string(),
        excluding,
    };
    if store.exists(&filter).await? {
        return Err(CoreError::DuplicateName {
            name: name.to_string(),
            parent_id,
        });
    }
    Ok(())
}
