//! Note entity, status values, and validation constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a note title in characters.
pub const MAX_NOTE_TITLE_LENGTH: u64 = 200;

/// Lifecycle state of a note. Deleting a note is a soft delete that moves it
/// to [`NoteStatus::Deleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    #[default]
    Active,
    Archived,
    Deleted,
}

impl NoteStatus {
    pub const ALL: [NoteStatus; 3] = [NoteStatus::Active, NoteStatus::Archived, NoteStatus::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStatus::Active => "active",
            NoteStatus::Archived => "archived",
            NoteStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid note status '{s}'. Must be one of: active, archived, deleted"
                ))
            })
    }
}

/// A note as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub status: NoteStatus,
    pub category_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
    pub is_pinned: bool,
    pub is_public: bool,
    /// Starts at 1 and increases whenever the title or content changes.
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in NoteStatus::ALL {
            assert_eq!(status.as_str().parse::<NoteStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_rejected() {
        let err = "pending".parse::<NoteStatus>().unwrap_err();
        assert!(err.to_string().contains("pending"));
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert!("Active".parse::<NoteStatus>().is_err());
    }

    #[test]
    fn default_status_is_active() {
        assert_eq!(NoteStatus::default(), NoteStatus::Active);
    }
}
