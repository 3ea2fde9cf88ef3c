//! Shared query parameter types for API handlers.

use notekeeper_core::pagination::PageRequest;
use serde::Deserialize;

/// Page-based pagination parameters (`?page=&limit=`).
///
/// Values are clamped when converted with [`PageParams::page_request`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page, self.limit)
    }
}

/// Text search parameters (`?q=&page=&limit=`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl SearchParams {
    /// The trimmed search term, or `None` when it is missing or blank.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page, self.limit)
    }
}
