//! In-process store for categories and notes.
//!
//! Each [`MemoryStore`] is an independent collection owned by whoever built
//! it (one per test, or one per process when running without a database).
//! Sibling-name uniqueness is enforced under the write lock, mirroring the
//! unique constraint of the PostgreSQL schema.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::model::{Category, CategoryPatch, NewCategory};
use super::store::{CategoryFilter, CategoryStore, NoteStore};
use crate::error::CoreError;
use crate::note::{Note, NoteStatus};
use crate::pagination::PageRequest;
use crate::types::DbId;

#[derive(Default)]
struct State {
    categories: BTreeMap<DbId, Category>,
    notes: BTreeMap<DbId, Note>,
    next_category_id: DbId,
    next_note_id: DbId,
}

impl State {
    fn sibling_taken(&self, parent_id: Option<DbId>, name: &str, excluding: Option<DbId>) -> bool {
        let filter = CategoryFilter::Sibling {
            parent_id,
            name: name.to_string(),
            excluding,
        };
        self.categories.values().any(|c| filter.matches(c))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a note, assigning it a fresh id. Returns the stored note.
    pub async fn add_note(&self, mut note: Note) -> Note {
        let mut state = self.state.write().await;
        state.next_note_id += 1;
        note.id = state.next_note_id;
        state.notes.insert(note.id, note.clone());
        note
    }

    pub async fn category_count(&self) -> usize {
        self.state.read().await.categories.len()
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.state.read().await.categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, CoreError> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn find_many(&self, filter: &CategoryFilter) -> Result<Vec<Category>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn exists(&self, filter: &CategoryFilter) -> Result<bool, CoreError> {
        let state = self.state.read().await;
        Ok(state.categories.values().any(|c| filter.matches(c)))
    }

    async fn insert(&self, input: &NewCategory) -> Result<Category, CoreError> {
        let mut state = self.state.write().await;
        if state.sibling_taken(input.parent_id, &input.name, None) {
            return Err(CoreError::DuplicateName {
                name: input.name.clone(),
                parent_id: input.parent_id,
            });
        }

        state.next_category_id += 1;
        let now = Utc::now();
        let category = Category {
            id: state.next_category_id,
            name: input.name.clone(),
            description: input.description.clone(),
            parent_id: input.parent_id,
            order: input.order,
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_by_id(
        &self,
        id: DbId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CoreError> {
        let mut state = self.state.write().await;
        let Some(existing) = state.categories.get(&id) else {
            return Ok(None);
        };

        let mut updated = existing.clone();
        patch.apply_to(&mut updated);
        if (updated.name != existing.name || updated.parent_id != existing.parent_id)
            && state.sibling_taken(updated.parent_id, &updated.name, Some(id))
        {
            return Err(CoreError::DuplicateName {
                name: updated.name,
                parent_id: updated.parent_id,
            });
        }

        updated.updated_at = Utc::now();
        state.categories.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.state.write().await.categories.remove(&id).is_some())
    }

    async fn delete_many(&self, filter: &CategoryFilter) -> Result<u64, CoreError> {
        let mut state = self.state.write().await;
        let before = state.categories.len();
        state.categories.retain(|_, c| !filter.matches(c));
        Ok((before - state.categories.len()) as u64)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn find_by_category_ids(
        &self,
        category_ids: &[DbId],
        page: PageRequest,
    ) -> Result<(Vec<Note>, i64), CoreError> {
        let state = self.state.read().await;
        let mut matching: Vec<Note> = state
            .notes
            .values()
            .filter(|n| n.status != NoteStatus::Deleted)
            .filter(|n| n.category_id.is_some_and(|id| category_ids.contains(&id)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        let total = i64::try_from(matching.len()).unwrap_or(i64::MAX);
        Ok((page.slice(&matching), total))
    }
}
