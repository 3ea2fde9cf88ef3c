//! Root-to-node path resolution over an id -> category arena.

use std::collections::{HashMap, HashSet};

use super::model::Category;
use crate::error::CoreError;
use crate::types::DbId;

/// Id-keyed view over a category snapshot.
pub struct CategoryIndex<'a> {
    by_id: HashMap<DbId, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: DbId) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    ///
    /// Stops at a root or at a parent reference that is missing from the
    /// snapshot. Fails with [`CoreError::CycleDetected`] if the walk comes
    /// back to an id it has already visited.
    pub fn ancestors(&self, id: DbId) -> Result<Vec<&'a Category>, CoreError> {
        let start = self.get(id).ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?;

        let mut visited = HashSet::from([id]);
        let mut out = Vec::new();
        let mut parent_id = start.parent_id;

        while let Some(pid) = parent_id {
            if !visited.insert(pid) {
                return Err(CoreError::CycleDetected { id: pid });
            }
            let Some(parent) = self.get(pid) else {
                break;
            };
            out.push(parent);
            parent_id = parent.parent_id;
        }

        Ok(out)
    }

    /// Whether `candidate` sits somewhere below `ancestor`.
    pub fn is_descendant_of(&self, candidate: DbId, ancestor: DbId) -> Result<bool, CoreError> {
        Ok(self.ancestors(candidate)?.iter().any(|c| c.id == ancestor))
    }
}

/// Root-first path to `id`, ending with the category itself.
pub fn resolve_path(categories: &[Category], id: DbId) -> Result<Vec<Category>, CoreError> {
    let index = CategoryIndex::new(categories);
    let target = index.get(id).ok_or(CoreError::NotFound {
        entity: "Category",
        id,
    })?;

    let mut path: Vec<Category> = index
        .ancestors(id)?
        .into_iter()
        .rev()
        .cloned()
        .collect();
    path.push(target.clone());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
