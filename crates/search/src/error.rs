//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised by a [`RecordStore`](crate::RecordStore) query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected or failed the query
    #[error("Backend query failed: {0}")]
    Backend(String),

    /// The backend could not be reached
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// Records came back in a shape we could not read
    #[error("Malformed records: {0}")]
    Decode(String),
}

impl StoreError {
    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Errors that end a search invocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The authoritative (browse or exact) query failed
    #[error("Failed to fetch artworks: {0}")]
    Store(#[from] StoreError),

    /// A newer search started on the same session before this one finished
    #[error("Search superseded by a newer request")]
    Superseded,
}

impl SearchError {
    /// Whether the caller should offer a retry
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
