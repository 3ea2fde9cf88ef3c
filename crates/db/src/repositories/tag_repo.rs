//! Repository for the `tags` table.
//!
//! Tag names are unique regardless of case (`uq_tags_name` on `lower(name)`).
//! Links to notes live in `note_tags` and are removed with the tag.

use notekeeper_core::tag::DEFAULT_TAG_COLOR;
use notekeeper_core::types::DbId;
use sqlx::PgPool;

use super::contains_pattern;
use crate::models::tag::{CreateTag, Tag, TagListParams, UpdateTag};

/// Column list for tags queries.
const COLUMNS: &str = "id, name, color, description, created_at, updated_at";

/// Provides CRUD operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag, defaulting the color to black.
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, color, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&input.name)
            .bind(input.color.as_deref().unwrap_or(DEFAULT_TAG_COLOR))
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tags by name, optionally narrowed by a name search, with the
    /// total count of matches.
    pub async fn list(
        pool: &PgPool,
        params: &TagListParams,
    ) -> Result<(Vec<Tag>, i64), sqlx::Error> {
        let page = params.page_request();
        let pattern = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(contains_pattern);
        let filter = "($1::TEXT IS NULL OR name ILIKE $1)";

        let query = format!(
            "SELECT {COLUMNS} FROM tags WHERE {filter} ORDER BY name ASC, id ASC LIMIT $2 OFFSET $3"
        );
        let tags = sqlx::query_as::<_, Tag>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM tags WHERE {filter}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((tags, total))
    }

    /// Update a tag by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTag,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag by ID. Its note links go with it. Returns `true` if a
    /// row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
