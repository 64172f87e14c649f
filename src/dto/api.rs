//! Payloads returned by the collection endpoints.

use serde::Serialize;

use crate::domain::entity::Summarize;

/// Result of listing a collection: the records and their counts.
#[derive(Debug, Serialize)]
#[serde(bound(serialize = "E: Serialize, E::Stats: Serialize"))]
pub struct ListResponse<E: Summarize> {
    pub items: Vec<E>,
    pub stats: E::Stats,
}

impl<E: Summarize> ListResponse<E> {
    pub fn new(items: Vec<E>) -> Self {
        let stats = E::summarize(&items);
        Self { items, stats }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
