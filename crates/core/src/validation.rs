//! Shared helpers for `validator`-derived request DTOs.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Reject strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Flatten field errors into a single deterministic, human-readable message.
///
/// Fields are sorted by name so the same input always yields the same text.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Trim an owned string in place, reusing the allocation when nothing changes.
pub fn trim_owned(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
        assert!(not_blank(" a ").is_ok());
    }

    #[test]
    fn describe_sorts_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));
        let mut blank = ValidationError::new("blank");
        blank.message = Some(Cow::Borrowed("must not be blank"));
        errors.add("description", blank);

        assert_eq!(describe(&errors), "description: must not be blank; name: length");
    }

    #[test]
    fn trim_owned_strips_surrounding_whitespace() {
        assert_eq!(trim_owned("  Work \n".to_string()), "Work");
        assert_eq!(trim_owned("Work".to_string()), "Work");
    }
}
