//! Typo-tolerant artwork search for the art marketplace.
//!
//! This crate provides:
//! - Single-edit typo variant generation (keyboard-aware, grapheme-safe)
//! - A multi-pass executor: exact match first, typo variants only when that
//!   comes back empty
//! - Sessions that discard results of superseded searches
//! - Match highlighting for presenting results
//!
//! The executor talks to any [`RecordStore`]; [`MemoryStore`] serves tests
//! and offline catalogues, and `artmarket-api-client` serves the hosted
//! backend.
//!
//! # Example
//!
//! ```
//! use artmarket_search::{MemoryStore, SearchExecutor, SearchPass};
//!
//! let store = MemoryStore::from_json(r#"[
//!     {"id": "1", "title": "Impression, Sunrise", "artist_name": "Claude Monet",
//!      "status": "approved", "created_at": "2024-01-01T00:00:00Z"}
//! ]"#).unwrap();
//!
//! let executor = SearchExecutor::new(store);
//! let outcome = tokio_test::block_on(executor.search("monett", "all")).unwrap();
//! assert_eq!(outcome.pass, SearchPass::Fuzzy);
//! assert_eq!(outcome.records[0].id, "1");
//! ```

mod error;
mod executor;
mod highlight;
mod record;
mod session;
mod store;
mod variants;

#[cfg(test)]
mod testing;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, SearchError, StoreError};
pub use executor::{
    dedupe_by_id, FuzzyReport, SearchExecutor, SearchOptions, SearchOutcome, SearchPass,
    MAX_FUZZY_QUERIES,
};
pub use highlight::{highlight, highlight_ranges};
pub use record::{
    category_filter, ArtworkImage, ArtworkStatus, MatchRecord, RecordQuery, ALL_CATEGORIES,
    SEARCHABLE_COLUMNS,
};
pub use session::{SearchSession, SearchTicket};
pub use store::{MemoryStore, RecordStore};
pub use variants::{typo_variants, typo_variants_with, VariantOptions};
