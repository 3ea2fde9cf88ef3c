//! Repository layer.
//!
//! Note and tag repositories are zero-sized structs providing async CRUD
//! methods that accept `&PgPool` as the first argument. Category storage is
//! a pool-owning [`PgCategoryStore`] because the category engine consumes it
//! through the core store traits.

pub mod category_repo;
pub mod note_repo;
pub mod tag_repo;

pub use category_repo::PgCategoryStore;
pub use note_repo::{NoteRepo, PgNoteStore};
pub use tag_repo::TagRepo;

/// Build an `ILIKE` pattern matching `term` anywhere, with its own
/// wildcard characters escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
