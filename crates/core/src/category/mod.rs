//! Hierarchical note categories.
//!
//! Categories form a forest through optional parent references. This module
//! holds the entity types, the store contracts, the pure tree/path
//! algorithms, the mutation guards, and [`CategoryEngine`], which ties them
//! together into the operations the API exposes.

pub mod engine;
pub mod guard;
pub mod memory;
pub mod model;
pub mod path;
pub mod store;
pub mod tree;

pub use engine::{CategoryEngine, REORDER_CONCURRENCY};
pub use memory::MemoryStore;
pub use model::{
    Category, CategoryListing, CategoryNode, CategoryPatch, Deleted, ListMode, NewCategory,
    ReorderItem, MAX_CATEGORY_DESCRIPTION_LENGTH, MAX_CATEGORY_NAME_LENGTH,
};
pub use path::{resolve_path, CategoryIndex};
pub use store::{CategoryFilter, CategoryStore, NoteStore};
pub use tree::{build_tree, build_tree_naive, flatten_tree, sort_categories};
