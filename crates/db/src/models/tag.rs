//! Tag rows and DTOs.

use notekeeper_core::pagination::PageRequest;
use notekeeper_core::tag::{validate_tag_color, MAX_TAG_DESCRIPTION_LENGTH, MAX_TAG_NAME_LENGTH};
use notekeeper_core::types::{DbId, Timestamp};
use notekeeper_core::validation::{not_blank, trim_owned};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag. Names are unique regardless of case.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTag {
    #[validate(custom(function = "not_blank"), length(max = MAX_TAG_NAME_LENGTH))]
    pub name: String,
    #[validate(custom(function = "validate_tag_color"))]
    pub color: Option<String>,
    #[validate(length(max = MAX_TAG_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
}

impl CreateTag {
    pub fn normalized(self) -> Self {
        Self {
            name: trim_owned(self.name),
            description: self.description.map(trim_owned),
            ..self
        }
    }
}

/// DTO for updating a tag.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTag {
    #[validate(custom(function = "not_blank"), length(max = MAX_TAG_NAME_LENGTH))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_tag_color"))]
    pub color: Option<String>,
    #[validate(length(max = MAX_TAG_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
}

impl UpdateTag {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(trim_owned),
            description: self.description.map(trim_owned),
            ..self
        }
    }
}

/// Query parameters for listing tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListParams {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl TagListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_accepts_missing_color() {
        let input: CreateTag = serde_json::from_str(r#"{"name":"rust"}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.color, None);
    }

    #[test]
    fn create_rejects_bad_color() {
        let input: CreateTag =
            serde_json::from_str(r##"{"name":"rust","color":"#12345"}"##).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_rejects_long_name_and_description() {
        let long_name = CreateTag {
            name: "n".repeat(51),
            color: None,
            description: None,
        };
        assert!(long_name.validate().is_err());

        let long_description = CreateTag {
            name: "rust".into(),
            color: None,
            description: Some("d".repeat(201)),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn update_checks_only_present_fields() {
        assert!(UpdateTag::default().validate().is_ok());
        let bad = UpdateTag {
            name: Some(" ".into()),
            ..UpdateTag::default()
        };
        assert!(bad.validate().is_err());
    }
}
