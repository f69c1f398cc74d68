//! The query capability search runs against.

use crate::error::StoreError;
use crate::record::{MatchRecord, RecordQuery};
use async_trait::async_trait;
use std::sync::Arc;

/// A queryable catalogue of records.
///
/// Implementations must apply every filter in the [`RecordQuery`] and return
/// matching records newest first.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Run one query
    async fn find(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>, StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn find(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>, StoreError> {
        (**self).find(query).await
    }
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    async fn find(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>, StoreError> {
        (**self).find(query).await
    }
}

/// In-memory record store.
///
/// Applies the same filters as the hosted backend: approved only, exact
/// category, case-insensitive substring across the text fields.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<MatchRecord>,
}

impl MemoryStore {
    /// Create a store over `records`
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON array
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Number of records held, including unapproved ones
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>, StoreError> {
        let mut found: Vec<MatchRecord> = self
            .records
            .iter()
            .filter(|record| query.accepts(record))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}
