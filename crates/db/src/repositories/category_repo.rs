//! PostgreSQL implementation of the category store.

use async_trait::async_trait;
use notekeeper_core::category::{Category, CategoryFilter, CategoryPatch, CategoryStore, NewCategory};
use notekeeper_core::error::CoreError;
use notekeeper_core::types::DbId;
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::QueryAs;
use sqlx::Postgres;

use crate::models::category::CategoryRow;

/// Column list for categories queries.
const COLUMNS: &str = r#"id, name, description, parent_id, "order", created_at, updated_at"#;

/// Unique constraint guarding sibling names.
const SIBLING_NAME_CONSTRAINT: &str = "uq_categories_parent_name";

/// Category store backed by the `categories` table.
#[derive(Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn filter_clause(filter: &CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::ChildrenOf(_) => "parent_id = $1",
        CategoryFilter::Sibling { .. } => {
            "parent_id IS NOT DISTINCT FROM $1 AND name = $2 AND ($3::BIGINT IS NULL OR id <> $3)"
        }
    }
}

fn bind_filter<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &'q CategoryFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match filter {
        CategoryFilter::ChildrenOf(id) => query.bind(*id),
        CategoryFilter::Sibling {
            parent_id,
            name,
            excluding,
        } => query.bind(*parent_id).bind(name.as_str()).bind(*excluding),
    }
}

fn is_sibling_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(SIBLING_NAME_CONSTRAINT)
        }
        _ => false,
    }
}

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("category store: {err}"))
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, CoreError> {
        let query = format!(r#"SELECT {COLUMNS} FROM categories ORDER BY "order", name, id"#);
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;
        Ok(row.map(Category::from))
    }

    async fn find_many(&self, filter: &CategoryFilter) -> Result<Vec<Category>, CoreError> {
        let query = format!(
            r#"SELECT {COLUMNS} FROM categories WHERE {} ORDER BY "order", name, id"#,
            filter_clause(filter)
        );
        let rows = bind_filter(sqlx::query_as::<_, CategoryRow>(&query), filter)
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn exists(&self, filter: &CategoryFilter) -> Result<bool, CoreError> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE {})",
            filter_clause(filter)
        );
        let (found,) = bind_filter(sqlx::query_as::<_, (bool,)>(&query), filter)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)?;
        Ok(found)
    }

    async fn insert(&self, input: &NewCategory) -> Result<Category, CoreError> {
        let query = format!(
            r#"INSERT INTO categories (name, description, parent_id, "order")
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.parent_id)
            .bind(input.order)
            .fetch_one(&self.pool)
            .await
            .map(Category::from)
            .map_err(|err| {
                if is_sibling_conflict(&err) {
                    CoreError::DuplicateName {
                        name: input.name.clone(),
                        parent_id: input.parent_id,
                    }
                } else {
                    internal(err)
                }
            })
    }

    async fn update_by_id(
        &self,
        id: DbId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CoreError> {
        let query = format!(
            r#"UPDATE categories SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                parent_id = CASE WHEN $5 THEN $6 ELSE parent_id END,
                "order" = COALESCE($7, "order")
             WHERE id = $1
             RETURNING {COLUMNS}"#
        );
        let result = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .bind(&patch.name)
            .bind(patch.description.is_some())
            .bind(patch.description.as_ref().and_then(|d| d.as_deref()))
            .bind(patch.parent_id.is_some())
            .bind(patch.parent_id.flatten())
            .bind(patch.order)
            .fetch_optional(&self.pool)
            .await;

        match result {
            Ok(row) => Ok(row.map(Category::from)),
            Err(err) if is_sibling_conflict(&err) => {
                // Report the name/parent pair the patch would have produced.
                let mut attempted = self.find_by_id(id).await?.ok_or(CoreError::NotFound {
                    entity: "Category",
                    id,
                })?;
                patch.apply_to(&mut attempted);
                Err(CoreError::DuplicateName {
                    name: attempted.name,
                    parent_id: attempted.parent_id,
                })
            }
            Err(err) => Err(internal(err)),
        }
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, filter: &CategoryFilter) -> Result<u64, CoreError> {
        let query = format!(
            "WITH removed AS (DELETE FROM categories WHERE {} RETURNING 1)
             SELECT COUNT(*) FROM removed",
            filter_clause(filter)
        );
        let (count,) = bind_filter(sqlx::query_as::<_, (i64,)>(&query), filter)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_filter_binds_one_parameter() {
        let clause = filter_clause(&CategoryFilter::ChildrenOf(4));
        assert_eq!(clause, "parent_id = $1");
    }

    #[test]
    fn sibling_filter_treats_null_parents_as_equal() {
        let clause = filter_clause(&CategoryFilter::Sibling {
            parent_id: None,
            name: "Work".into(),
            excluding: None,
        });
        assert!(clause.contains("IS NOT DISTINCT FROM $1"));
        assert!(clause.contains("$3"));
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        assert!(!is_sibling_conflict(&sqlx::Error::RowNotFound));
    }
}
