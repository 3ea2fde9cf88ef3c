use std::sync::Arc;

use notekeeper_core::category::CategoryEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the note and tag handlers.
    pub pool: notekeeper_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Category tree engine over whichever stores the binary wired in.
    pub categories: CategoryEngine,
}
