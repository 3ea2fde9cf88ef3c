//! Row mapping for the `categories` table.
//!
//! The request DTOs live in `notekeeper_core::category` because the engine
//! validates and normalizes them itself.

use notekeeper_core::category::Category;
use notekeeper_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<DbId>,
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            parent_id: row.parent_id,
            order: row.order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
