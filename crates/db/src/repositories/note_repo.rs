//! Repository for the `notes` and `note_tags` tables.

use async_trait::async_trait;
use notekeeper_core::category::NoteStore;
use notekeeper_core::error::CoreError;
use notekeeper_core::note::{Note, NoteStatus};
use notekeeper_core::pagination::PageRequest;
use notekeeper_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use super::contains_pattern;
use crate::models::note::{CreateNote, NoteListParams, NoteRow, UpdateNote};

/// Column list for notes queries. Expects the notes relation aliased as `n`.
const COLUMNS: &str = "n.id, n.title, n.content, n.status, n.category_id, \
    COALESCE((SELECT ARRAY_AGG(nt.tag_id ORDER BY nt.tag_id) \
              FROM note_tags nt WHERE nt.note_id = n.id), ARRAY[]::BIGINT[]) AS tag_ids, \
    n.is_pinned, n.is_public, n.version, n.created_at, n.updated_at";

/// Newest first; id breaks ties so pages are stable.
const ORDER_BY: &str = "ORDER BY n.updated_at DESC, n.id DESC";

fn decode(row: NoteRow) -> Result<Note, sqlx::Error> {
    Note::try_from(row).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

fn decode_all(rows: Vec<NoteRow>) -> Result<Vec<Note>, sqlx::Error> {
    rows.into_iter().map(decode).collect()
}

/// Provides CRUD, search and status transitions for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Create a note and its tag links in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO notes (title, content, category_id, is_pinned, is_public)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.category_id)
        .bind(input.is_pinned)
        .bind(input.is_public)
        .fetch_one(&mut *tx)
        .await?;

        Self::link_tags(&mut *tx, id, &input.tag_ids).await?;
        let note = Self::fetch(&mut *tx, id).await?;
        tx.commit().await?;

        note.ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a note by its ID, whatever its status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes n WHERE n.id = $1");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// List notes matching the filters, newest first, with the total count.
    ///
    /// Deleted notes are only included when `status=deleted` is requested.
    pub async fn list(
        pool: &PgPool,
        params: &NoteListParams,
    ) -> Result<(Vec<Note>, i64), sqlx::Error> {
        let page = params.page_request();
        let status = params.status.map(|s| s.as_str());
        let filter = "((($1::TEXT IS NULL AND n.status <> 'deleted') OR n.status = $1)
             AND ($2::BIGINT IS NULL OR n.category_id = $2)
             AND ($3::BIGINT IS NULL OR EXISTS (
                 SELECT 1 FROM note_tags t WHERE t.note_id = n.id AND t.tag_id = $3)))";

        let query = format!(
            "SELECT {COLUMNS} FROM notes n WHERE {filter} {ORDER_BY} LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(status)
            .bind(params.category_id)
            .bind(params.tag_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM notes n WHERE {filter}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(status)
            .bind(params.category_id)
            .bind(params.tag_id)
            .fetch_one(pool)
            .await?;

        Ok((decode_all(rows)?, total))
    }

    /// Case-insensitive substring search over title and content.
    /// Deleted notes never match.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        page: PageRequest,
    ) -> Result<(Vec<Note>, i64), sqlx::Error> {
        let pattern = contains_pattern(term);
        let filter = "n.status <> 'deleted' AND (n.title ILIKE $1 OR n.content ILIKE $1)";

        let query = format!(
            "SELECT {COLUMNS} FROM notes n WHERE {filter} {ORDER_BY} LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM notes n WHERE {filter}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((decode_all(rows)?, total))
    }

    /// Non-deleted notes filed under any of `category_ids`, newest first.
    pub async fn find_by_category_ids(
        pool: &PgPool,
        category_ids: &[DbId],
        page: PageRequest,
    ) -> Result<(Vec<Note>, i64), sqlx::Error> {
        let filter = "n.status <> 'deleted' AND n.category_id = ANY($1)";

        let query = format!(
            "SELECT {COLUMNS} FROM notes n WHERE {filter} {ORDER_BY} LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(category_ids)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM notes n WHERE {filter}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(category_ids)
            .fetch_one(pool)
            .await?;

        Ok((decode_all(rows)?, total))
    }

    /// Non-deleted notes carrying `tag_id`, newest first.
    pub async fn find_by_tag(
        pool: &PgPool,
        tag_id: DbId,
        page: PageRequest,
    ) -> Result<(Vec<Note>, i64), sqlx::Error> {
        let filter = "n.status <> 'deleted' AND EXISTS (
             SELECT 1 FROM note_tags t WHERE t.note_id = n.id AND t.tag_id = $1)";

        let query = format!(
            "SELECT {COLUMNS} FROM notes n WHERE {filter} {ORDER_BY} LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(tag_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM notes n WHERE {filter}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(tag_id)
            .fetch_one(pool)
            .await?;

        Ok((decode_all(rows)?, total))
    }

    /// Apply a partial update. The version increases when the title or the
    /// content actually changes. A present `tag_ids` replaces the tag set.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE notes AS n SET
                version = n.version + CASE
                    WHEN ($2::TEXT IS NOT NULL AND $2 <> n.title)
                      OR ($3::TEXT IS NOT NULL AND $3 <> n.content) THEN 1
                    ELSE 0
                END,
                title = COALESCE($2, n.title),
                content = COALESCE($3, n.content),
                status = COALESCE($4, n.status),
                category_id = CASE WHEN $5 THEN $6 ELSE n.category_id END,
                is_pinned = COALESCE($7, n.is_pinned),
                is_public = COALESCE($8, n.is_public)
             WHERE n.id = $1
             RETURNING n.id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.status.map(|s| s.as_str()))
        .bind(input.category_id.is_some())
        .bind(input.category_id.flatten())
        .bind(input.is_pinned)
        .bind(input.is_public)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        if let Some(tag_ids) = &input.tag_ids {
            sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::link_tags(&mut *tx, id, tag_ids).await?;
        }

        let note = Self::fetch(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(note)
    }

    /// Move a note to `status`, returning the updated note.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: NoteStatus,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "WITH n AS (UPDATE notes SET status = $2 WHERE id = $1 RETURNING *)
             SELECT {COLUMNS} FROM n"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Soft delete: the row stays, with status `deleted`.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        Self::set_status(pool, id, NoteStatus::Deleted).await
    }

    pub async fn archive(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        Self::set_status(pool, id, NoteStatus::Archived).await
    }

    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        Self::set_status(pool, id, NoteStatus::Active).await
    }

    async fn link_tags(
        conn: &mut PgConnection,
        note_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO note_tags (note_id, tag_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(note_id)
        .bind(tag_ids)
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn fetch(conn: &mut PgConnection, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes n WHERE n.id = $1");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(decode)
            .transpose()
    }
}

/// Note lookups for the category engine, backed by [`NoteRepo`].
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn find_by_category_ids(
        &self,
        category_ids: &[DbId],
        page: PageRequest,
    ) -> Result<(Vec<Note>, i64), CoreError> {
        NoteRepo::find_by_category_ids(&self.pool, category_ids, page)
            .await
            .map_err(|err| CoreError::Internal(format!("note store: {err}")))
    }
}
