//! Domain types, validation, and the category tree engine for notekeeper.
//!
//! This crate has no I/O of its own. Persistence is reached through the
//! store traits in [`category::store`], implemented by `notekeeper-db` and
//! by the in-process [`category::MemoryStore`].

pub mod category;
pub mod error;
pub mod note;
pub mod pagination;
pub mod tag;
pub mod types;
pub mod validation;
