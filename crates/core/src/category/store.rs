//! Persistence contracts consumed by the category engine.
//!
//! The engine only ever talks to these traits. PostgreSQL implementations
//! live in `notekeeper-db`; [`super::memory::MemoryStore`] backs tests.

use async_trait::async_trait;

use super::model::{Category, CategoryPatch, NewCategory};
use crate::error::CoreError;
use crate::note::Note;
use crate::pagination::PageRequest;
use crate::types::DbId;

/// Selection of categories for `exists`, `find_many` and `delete_many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Direct children of the given category.
    ChildrenOf(DbId),
    /// A category with this exact name under this parent, optionally
    /// ignoring one id (the category being updated).
    Sibling {
        parent_id: Option<DbId>,
        name: String,
        excluding: Option<DbId>,
    },
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::ChildrenOf(id) => category.parent_id == Some(*id),
            CategoryFilter::Sibling {
                parent_id,
                name,
                excluding,
            } => {
                category.parent_id == *parent_id
                    && category.name == *name
                    && Some(category.id) != *excluding
            }
        }
    }
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Category>, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, CoreError>;

    async fn find_many(&self, filter: &CategoryFilter) -> Result<Vec<Category>, CoreError>;

    async fn exists(&self, filter: &CategoryFilter) -> Result<bool, CoreError>;

    /// Insert a new category. Implementations must reject a duplicate
    /// `(parent_id, name)` pair with [`CoreError::DuplicateName`].
    async fn insert(&self, input: &NewCategory) -> Result<Category, CoreError>;

    /// Apply a partial update. Returns `None` if the id does not exist.
    async fn update_by_id(
        &self,
        id: DbId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CoreError>;

    /// Returns `true` if a row was deleted.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, CoreError>;

    /// Returns the number of rows deleted.
    async fn delete_many(&self, filter: &CategoryFilter) -> Result<u64, CoreError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Notes filed under any of `category_ids`, most recently updated first,
    /// together with the total number of matches across all pages.
    async fn find_by_category_ids(
        &self,
        category_ids: &[DbId],
        page: PageRequest,
    ) -> Result<(Vec<Note>, i64), CoreError>;
}
