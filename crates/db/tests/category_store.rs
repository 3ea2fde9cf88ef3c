//! Integration tests for `PgCategoryStore` against a real database.
//!
//! Covers what only PostgreSQL enforces or computes:
//! - `uq_categories_parent_name` rejecting duplicate siblings, roots included
//! - partial updates (explicit `null` parent / description)
//! - the shallow cascade leaving grandchildren with a dangling `parent_id`

use std::sync::Arc;

use notekeeper_core::category::{
    CategoryEngine, CategoryFilter, CategoryPatch, CategoryStore, NewCategory,
};
use notekeeper_core::error::CoreError;
use notekeeper_core::types::DbId;
use notekeeper_db::repositories::{PgCategoryStore, PgNoteStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_category(name: &str, parent_id: Option<DbId>) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: None,
        parent_id,
        order: 0,
    }
}

fn patch(json: &str) -> CategoryPatch {
    serde_json::from_str(json).unwrap()
}

fn engine(pool: &PgPool) -> CategoryEngine {
    CategoryEngine::new(
        Arc::new(PgCategoryStore::new(pool.clone())),
        Arc::new(PgNoteStore::new(pool.clone())),
    )
}

// ---------------------------------------------------------------------------
// Test: sibling uniqueness constraint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_root_name_rejected_by_constraint(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    store.insert(&new_category("Work", None)).await.unwrap();

    let err = store.insert(&new_category("Work", None)).await.unwrap_err();
    match err {
        CoreError::DuplicateName { name, parent_id } => {
            assert_eq!(name, "Work");
            assert_eq!(parent_id, None, "NULL parents must compare equal");
        }
        other => panic!("expected DuplicateName, got {other:?}"),
    }

    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_child_name_rejected_per_parent(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let work = store.insert(&new_category("Work", None)).await.unwrap();
    let home = store.insert(&new_category("Home", None)).await.unwrap();

    store.insert(&new_category("Ideas", Some(work.id))).await.unwrap();
    store.insert(&new_category("Ideas", Some(home.id))).await.unwrap();
    store.insert(&new_category("Ideas", None)).await.unwrap();

    let err = store
        .insert(&new_category("Ideas", Some(work.id)))
        .await
        .unwrap_err();
    assert!(
        matches!(err, CoreError::DuplicateName { parent_id: Some(p), .. } if p == work.id),
        "unexpected error: {err:?}"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_onto_taken_name_reports_attempted_pair(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let work = store.insert(&new_category("Work", None)).await.unwrap();
    let meetings = store
        .insert(&new_category("Meetings", Some(work.id)))
        .await
        .unwrap();
    store.insert(&new_category("Meetings", None)).await.unwrap();

    let err = store
        .update_by_id(meetings.id, &patch(r#"{"parent_id":null}"#))
        .await
        .unwrap_err();
    match err {
        CoreError::DuplicateName { name, parent_id } => {
            assert_eq!(name, "Meetings");
            assert_eq!(parent_id, None);
        }
        other => panic!("expected DuplicateName, got {other:?}"),
    }

    let unchanged = store.find_by_id(meetings.id).await.unwrap().unwrap();
    assert_eq!(unchanged.parent_id, Some(work.id));
}

// ---------------------------------------------------------------------------
// Test: partial updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_null_parent_moves_category_to_root(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let work = store.insert(&new_category("Work", None)).await.unwrap();
    let mut input = new_category("Meetings", Some(work.id));
    input.description = Some("weekly".to_string());
    let meetings = store.insert(&input).await.unwrap();

    let moved = store
        .update_by_id(meetings.id, &patch(r#"{"parent_id":null}"#))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(moved.parent_id, None);
    assert_eq!(moved.name, "Meetings");
    assert_eq!(moved.description.as_deref(), Some("weekly"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_absent_parent_is_left_untouched(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let work = store.insert(&new_category("Work", None)).await.unwrap();
    let meetings = store
        .insert(&new_category("Meetings", Some(work.id)))
        .await
        .unwrap();

    let renamed = store
        .update_by_id(meetings.id, &patch(r#"{"name":"Standups","order":3}"#))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(renamed.parent_id, Some(work.id));
    assert_eq!(renamed.name, "Standups");
    assert_eq!(renamed.order, 3);
    assert!(renamed.updated_at >= meetings.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_null_description_clears_it(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let mut input = new_category("Work", None);
    input.description = Some("old".to_string());
    let work = store.insert(&input).await.unwrap();

    let kept = store
        .update_by_id(work.id, &patch(r#"{"order":1}"#))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.description.as_deref(), Some("old"));

    let cleared = store
        .update_by_id(work.id, &patch(r#"{"description":null}"#))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.description, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_unknown_returns_none(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let result = store.update_by_id(999, &patch(r#"{"name":"x"}"#)).await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: filters and deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_many_counts_removed_children(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let work = store.insert(&new_category("Work", None)).await.unwrap();
    store.insert(&new_category("A", Some(work.id))).await.unwrap();
    store.insert(&new_category("B", Some(work.id))).await.unwrap();

    assert!(store.exists(&CategoryFilter::ChildrenOf(work.id)).await.unwrap());

    let removed = store
        .delete_many(&CategoryFilter::ChildrenOf(work.id))
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert!(!store.exists(&CategoryFilter::ChildrenOf(work.id)).await.unwrap());

    let none_left = store
        .delete_many(&CategoryFilter::ChildrenOf(work.id))
        .await
        .unwrap();
    assert_eq!(none_left, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sibling_filter_excludes_self(pool: PgPool) {
    let store = PgCategoryStore::new(pool);
    let work = store.insert(&new_category("Work", None)).await.unwrap();

    let taken = CategoryFilter::Sibling {
        parent_id: None,
        name: "Work".to_string(),
        excluding: None,
    };
    assert!(store.exists(&taken).await.unwrap());

    let only_self = CategoryFilter::Sibling {
        parent_id: None,
        name: "Work".to_string(),
        excluding: Some(work.id),
    };
    assert!(!store.exists(&only_self).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cascade_leaves_grandchild_dangling(pool: PgPool) {
    let engine = engine(&pool);
    let a = engine.create(new_category("A", None)).await.unwrap();
    let b = engine.create(new_category("B", Some(a.id))).await.unwrap();
    let c = engine.create(new_category("C", Some(b.id))).await.unwrap();

    let deleted = engine.delete(a.id, true).await.unwrap();
    assert_eq!(deleted.id, a.id);
    assert_eq!(deleted.children_deleted, 1);

    let store = PgCategoryStore::new(pool);
    assert!(store.find_by_id(a.id).await.unwrap().is_none());
    assert!(store.find_by_id(b.id).await.unwrap().is_none());

    let orphan = store.find_by_id(c.id).await.unwrap().unwrap();
    assert_eq!(orphan.parent_id, Some(b.id), "grandchild keeps its parent id");

    let path = engine.path(c.id).await.unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].id, c.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_with_children_without_cascade_is_refused(pool: PgPool) {
    let engine = engine(&pool);
    let a = engine.create(new_category("A", None)).await.unwrap();
    engine.create(new_category("B", Some(a.id))).await.unwrap();

    let err = engine.delete(a.id, false).await.unwrap_err();
    assert!(matches!(err, CoreError::HasSubcategories { id } if id == a.id));

    let store = PgCategoryStore::new(pool);
    assert_eq!(store.find_all().await.unwrap().len(), 2);
}
