//! Category entities, request payloads, and listing shapes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pagination::{PageRequest, Paginated};
use crate::types::{double_option, DbId, Timestamp};
use crate::validation::{not_blank, trim_owned};

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: u64 = 100;

/// Maximum length of a category description in characters.
pub const MAX_CATEGORY_DESCRIPTION_LENGTH: u64 = 500;

/// A persisted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<DbId>,
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A category with its children resolved, as returned by tree listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCategory {
    #[validate(
        custom(function = "not_blank"),
        length(max = MAX_CATEGORY_NAME_LENGTH)
    )]
    pub name: String,
    #[validate(length(max = MAX_CATEGORY_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<DbId>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order: i32,
}

impl NewCategory {
    /// Trim surrounding whitespace from text fields. A blank description
    /// becomes `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: trim_owned(self.name),
            description: self.description.and_then(non_blank),
            ..self
        }
    }
}

/// Partial update for a category. Absent fields are left untouched.
///
/// `description` and `parent_id` distinguish "absent" (`None`) from an
/// explicit `null` (`Some(None)`): a null description is cleared, a null
/// parent moves the category to the root.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryPatch {
    #[validate(
        custom(function = "not_blank"),
        length(max = MAX_CATEGORY_NAME_LENGTH)
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = MAX_CATEGORY_DESCRIPTION_LENGTH))]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<DbId>>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

impl CategoryPatch {
    /// A patch that only changes the display order.
    pub fn order(order: i32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    /// Trim surrounding whitespace from text fields. A blank description
    /// clears the stored one.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(trim_owned),
            description: self.description.map(|d| d.and_then(non_blank)),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.parent_id.is_none()
            && self.order.is_none()
    }

    /// Apply this patch to a category in place. Does not touch timestamps.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = description.clone();
        }
        if let Some(parent_id) = self.parent_id {
            category.parent_id = parent_id;
        }
        if let Some(order) = self.order {
            category.order = order;
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let value = trim_owned(value);
    (!value.is_empty()).then_some(value)
}

/// One `(id, order)` pair of a reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReorderItem {
    pub id: DbId,
    pub order: i32,
}

/// How `list` should shape its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Sorted flat list, one page at a time.
    Flat(PageRequest),
    /// Every category nested under its parent.
    Tree,
}

/// Result of `list`, shaped according to the requested [`ListMode`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CategoryListing {
    Flat(Paginated<Category>),
    Tree(Vec<CategoryNode>),
}

/// Outcome of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub id: DbId,
    /// Direct children removed by a cascading delete.
    pub children_deleted: u64,
}
