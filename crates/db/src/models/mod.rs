//! Row structs and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod category;
pub mod note;
pub mod tag;
