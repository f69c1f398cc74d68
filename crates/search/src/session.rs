//! Search sessions that discard superseded results.
//!
//! Interactive search fires a new request per (debounced) keystroke, so a
//! slow older request can finish after a newer one. A [`SearchSession`]
//! numbers each request; when a request finishes after a newer one has
//! started, it returns [`SearchError::Superseded`] instead of its records.

use crate::error::{Result, SearchError};
use crate::executor::{SearchExecutor, SearchOutcome};
use crate::store::RecordStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Handle identifying one search request within a session.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl SearchTicket {
    /// Generation number of this request
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once a newer request has started or the session was cancelled
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }
}

/// A shared executor plus a generation counter.
///
/// Cloning a session shares both, so every clone supersedes the others.
pub struct SearchSession<S> {
    executor: Arc<SearchExecutor<S>>,
    latest: Arc<AtomicU64>,
}

impl<S> Clone for SearchSession<S> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            latest: Arc::clone(&self.latest),
        }
    }
}

impl<S: RecordStore> SearchSession<S> {
    /// Create a session around an executor
    pub fn new(executor: SearchExecutor<S>) -> Self {
        Self {
            executor: Arc::new(executor),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The wrapped executor
    pub fn executor(&self) -> &SearchExecutor<S> {
        &self.executor
    }

    /// Start a new generation, superseding every outstanding ticket
    pub fn begin(&self) -> SearchTicket {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        SearchTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Supersede every in-flight search without starting a new one
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }

    /// Generation of the most recent request
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Run a search, superseding any search still running on this session.
    pub async fn search(&self, term: &str, category: &str) -> Result<SearchOutcome> {
        let ticket = self.begin();
        let result = self.executor.execute(term, category, Some(&ticket)).await;

        if !ticket.is_current() {
            debug!(generation = ticket.generation(), "Discarding superseded search");
            return Err(SearchError::Superseded);
        }
        result
    }
}
