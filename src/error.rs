//! Error type crossing the report boundary.
//!
//! Formatting and aggregation are total; the only way a report can fail is
//! a lookup against the external store.

use thiserror::Error;

/// A domain or record lookup against the store failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    /// The logical collection does not exist
    #[error("no such table: {0}")]
    UnknownCollection(String),

    /// The collection exists but has no such field
    #[error("no such column: {0}")]
    UnknownField(String),

    /// Any other store-side failure
    #[error("{0}")]
    Store(String),
}

impl LookupFailure {
    /// Short machine-readable kind, used in logs and JSON output
    pub fn code(&self) -> &'static str {
        match self {
            LookupFailure::UnknownCollection(_) => "unknown_collection",
            LookupFailure::UnknownField(_) => "unknown_field",
            LookupFailure::Store(_) => "store",
        }
    }
}
