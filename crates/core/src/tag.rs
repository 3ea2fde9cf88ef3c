//! Tag constants and validation functions.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Maximum length of a tag name in characters.
pub const MAX_TAG_NAME_LENGTH: u64 = 50;

/// Maximum length of a tag description in characters.
pub const MAX_TAG_DESCRIPTION_LENGTH: u64 = 200;

/// Color assigned when a tag is created without one.
pub const DEFAULT_TAG_COLOR: &str = "#000000";

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Whether `color` is a `#RRGGBB` hex color.
pub fn is_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// `validator` hook for tag colors.
pub fn validate_tag_color(color: &str) -> Result<(), ValidationError> {
    if is_hex_color(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("must be a valid hex color code".into());
        Err(err)
    }
}

/// Canonical form used for case-insensitive tag name uniqueness.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_six_digit_hex() {
        assert!(is_hex_color("#A0b1C2"));
        assert!(is_hex_color(DEFAULT_TAG_COLOR));
    }

    #[test]
    fn rejects_short_or_unprefixed_hex() {
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("A0B1C2"));
        assert!(!is_hex_color("#A0B1C2FF"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn validate_tag_color_message() {
        let err = validate_tag_color("red").unwrap_err();
        assert_eq!(err.code, "hex_color");
    }

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_tag_name("  Rust "), "rust");
    }
}
