//! Note rows and DTOs.

use notekeeper_core::error::CoreError;
use notekeeper_core::note::{Note, NoteStatus, MAX_NOTE_TITLE_LENGTH};
use notekeeper_core::pagination::PageRequest;
use notekeeper_core::types::{double_option, DbId, Timestamp};
use notekeeper_core::validation::{not_blank, trim_owned};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notes` table, with its tag ids aggregated from `note_tags`.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub status: String,
    pub category_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
    pub is_pinned: bool,
    pub is_public: bool,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<NoteRow> for Note {
    type Error = CoreError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        Ok(Note {
            id: row.id,
            title: row.title,
            content: row.content,
            status: row.status.parse()?,
            category_id: row.category_id,
            tag_ids: row.tag_ids,
            is_pinned: row.is_pinned,
            is_public: row.is_public,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// DTO for creating a note. New notes always start out `active`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    #[validate(custom(function = "not_blank"), length(max = MAX_NOTE_TITLE_LENGTH))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_public: bool,
}

impl CreateNote {
    /// Trim the title and drop repeated tag ids.
    pub fn normalized(self) -> Self {
        Self {
            title: trim_owned(self.title),
            tag_ids: dedup_ids(self.tag_ids),
            ..self
        }
    }
}

/// DTO for updating a note. `category_id: null` clears the category;
/// `tag_ids` replaces the whole tag set when present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNote {
    #[validate(custom(function = "not_blank"), length(max = MAX_NOTE_TITLE_LENGTH))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub content: Option<String>,
    pub status: Option<NoteStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<DbId>>,
    pub tag_ids: Option<Vec<DbId>>,
    pub is_pinned: Option<bool>,
    pub is_public: Option<bool>,
}

impl UpdateNote {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(trim_owned),
            tag_ids: self.tag_ids.map(dedup_ids),
            ..self
        }
    }
}

/// Query parameters for listing notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteListParams {
    /// Only notes in this state. Without it, deleted notes are hidden.
    pub status: Option<NoteStatus>,
    pub category_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl NoteListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page, self.limit)
    }
}

fn dedup_ids(mut ids: Vec<DbId>) -> Vec<DbId> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, content: &str) -> CreateNote {
        CreateNote {
            title: title.to_string(),
            content: content.to_string(),
            category_id: None,
            tag_ids: Vec::new(),
            is_pinned: false,
            is_public: false,
        }
    }

    #[test]
    fn create_requires_title_and_content() {
        assert!(create("Groceries", "milk").validate().is_ok());
        assert!(create("  ", "milk").validate().is_err());
        assert!(create("Groceries", "").validate().is_err());
    }

    #[test]
    fn create_rejects_long_title() {
        assert!(create(&"t".repeat(201), "body").validate().is_err());
        assert!(create(&"t".repeat(200), "body").validate().is_ok());
    }

    #[test]
    fn create_normalizes_title_and_tags() {
        let mut input = create("  Groceries ", "milk");
        input.tag_ids = vec![3, 1, 3, 2, 1];
        let input = input.normalized();
        assert_eq!(input.title, "Groceries");
        assert_eq!(input.tag_ids, vec![1, 2, 3]);
    }

    #[test]
    fn update_distinguishes_null_category() {
        let clear: UpdateNote = serde_json::from_str(r#"{"category_id":null}"#).unwrap();
        assert_eq!(clear.category_id, Some(None));

        let untouched: UpdateNote = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(untouched.category_id, None);
    }

    #[test]
    fn update_parses_status() {
        let input: UpdateNote = serde_json::from_str(r#"{"status":"archived"}"#).unwrap();
        assert_eq!(input.status, Some(NoteStatus::Archived));
        assert!(serde_json::from_str::<UpdateNote>(r#"{"status":"gone"}"#).is_err());
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let now = chrono::Utc::now();
        let row = NoteRow {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            status: "pending".into(),
            category_id: None,
            tag_ids: vec![],
            is_pinned: false,
            is_public: false,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        assert!(Note::try_from(row).is_err());
    }
}
