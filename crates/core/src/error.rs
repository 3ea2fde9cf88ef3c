use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Parent category {parent_id} not found")]
    ParentNotFound { parent_id: DbId },

    #[error("Invalid parent: {0}")]
    InvalidParent(String),

    #[error("Category '{name}' already exists under {}", parent_label(.parent_id))]
    DuplicateName {
        name: String,
        parent_id: Option<DbId>,
    },

    #[error("Category {id} has subcategories; pass cascade to delete them")]
    HasSubcategories { id: DbId },

    #[error("Cycle detected in category hierarchy at id {id}")]
    CycleDetected { id: DbId },

    #[error(
        "Deleted {children_deleted} subcategories of category {id} but failed to delete it: {reason}"
    )]
    PartialDeleteFailure {
        id: DbId,
        children_deleted: u64,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn parent_label(parent_id: &Option<DbId>) -> String {
    match parent_id {
        Some(id) => format!("parent {id}"),
        None => "the root".to_string(),
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(crate::validation::describe(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_message_names_the_parent() {
        let err = CoreError::DuplicateName {
            name: "Work".into(),
            parent_id: Some(7),
        };
        assert_eq!(err.to_string(), "Category 'Work' already exists under parent 7");
    }

    #[test]
    fn duplicate_name_message_at_root() {
        let err = CoreError::DuplicateName {
            name: "Work".into(),
            parent_id: None,
        };
        assert_eq!(err.to_string(), "Category 'Work' already exists under the root");
    }

    #[test]
    fn partial_delete_message_reports_children() {
        let err = CoreError::PartialDeleteFailure {
            id: 3,
            children_deleted: 2,
            reason: "connection reset".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Deleted 2 subcategories"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}
