//! Multi-pass search execution.
//!
//! A search runs at most two passes against a [`RecordStore`]:
//!
//! 1. **Exact**: the term itself as a substring across every text field.
//!    Errors propagate; any hit ends the search.
//! 2. **Fuzzy**: only when the exact pass is empty. Up to
//!    [`MAX_FUZZY_QUERIES`] typo variants are queried; failures are logged
//!    and skipped, and the merged records are de-duplicated by id.
//!
//! An empty term skips both and browses the category instead.

use crate::error::{Result, SearchError};
use crate::record::{category_filter, MatchRecord, RecordQuery};
use crate::session::SearchTicket;
use crate::store::RecordStore;
use crate::variants::{typo_variants_with, VariantOptions};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Upper bound on fuzzy queries issued by one search.
pub const MAX_FUZZY_QUERIES: usize = 50;

/// Executor tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Variants queried in the fuzzy pass, clamped to [`MAX_FUZZY_QUERIES`]
    pub max_variants: usize,
    /// Fuzzy queries in flight at once; 1 queries sequentially
    pub fuzzy_concurrency: usize,
    /// Edit classes used to build variants
    pub variants: VariantOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_variants: MAX_FUZZY_QUERIES,
            fuzzy_concurrency: 1,
            variants: VariantOptions::default(),
        }
    }
}

impl SearchOptions {
    /// Builder-style method to set the fuzzy concurrency cap
    #[must_use]
    pub fn with_fuzzy_concurrency(mut self, concurrency: usize) -> Self {
        self.fuzzy_concurrency = concurrency;
        self
    }

    /// Builder-style method to set the variant budget
    #[must_use]
    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.max_variants = max_variants;
        self
    }

    fn variant_budget(&self) -> usize {
        self.max_variants.min(MAX_FUZZY_QUERIES)
    }
}

/// Which pass produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPass {
    /// Empty term, category listing
    Browse,
    /// The term matched as typed
    Exact,
    /// Typo variants were tried
    Fuzzy,
}

/// Diagnostics from a fuzzy pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyReport {
    /// Variant queries that completed or failed
    pub variants_tried: usize,
    /// Variant queries that failed and were skipped
    pub variants_failed: usize,
    /// Variants that returned at least one record, in query order
    pub matched_variants: Vec<String>,
}

/// The records a search produced and how it got them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub pass: SearchPass,
    pub records: Vec<MatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyReport>,
}

impl SearchOutcome {
    fn new(pass: SearchPass, records: Vec<MatchRecord>) -> Self {
        Self {
            pass,
            records,
            fuzzy: None,
        }
    }

    /// Number of records found
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether typo variants were needed
    #[must_use]
    pub fn used_typo_tolerance(&self) -> bool {
        self.pass == SearchPass::Fuzzy
    }
}

/// Runs searches against a record store.
#[derive(Debug, Clone)]
pub struct SearchExecutor<S> {
    store: S,
    options: SearchOptions,
}

impl<S: RecordStore> SearchExecutor<S> {
    /// Create an executor with default options
    pub fn new(store: S) -> Self {
        Self::with_options(store, SearchOptions::default())
    }

    /// Create an executor with specific options
    pub fn with_options(store: S, options: SearchOptions) -> Self {
        Self { store, options }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current options
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Search for `term` within `category` (`"all"` or empty for every category).
    pub async fn search(&self, term: &str, category: &str) -> Result<SearchOutcome> {
        self.execute(term, category, None).await
    }

    pub(crate) async fn execute(
        &self,
        term: &str,
        category: &str,
        ticket: Option<&SearchTicket>,
    ) -> Result<SearchOutcome> {
        let term = term.trim();
        let category = category_filter(category);

        if term.is_empty() {
            debug!(category = ?category, "Browsing category");
            let records = self.store.find(&RecordQuery::browse(category)).await?;
            return Ok(SearchOutcome::new(SearchPass::Browse, records));
        }

        let records = self
            .store
            .find(&RecordQuery::matching(term, category))
            .await?;
        if !records.is_empty() {
            debug!(term = %term, hits = records.len(), "Exact pass matched");
            return Ok(SearchOutcome::new(SearchPass::Exact, records));
        }

        ensure_current(ticket)?;
        debug!(term = %term, "Exact pass empty, trying typo variants");
        self.fuzzy_pass(term, category, ticket).await
    }

    async fn fuzzy_pass(
        &self,
        term: &str,
        category: Option<&str>,
        ticket: Option<&SearchTicket>,
    ) -> Result<SearchOutcome> {
        let variants: Vec<String> = typo_variants_with(term, &self.options.variants)
            .into_iter()
            .take(self.options.variant_budget())
            .collect();

        let store = &self.store;
        let mut queries = stream::iter(variants.iter().map(|variant| {
            let query = RecordQuery::matching(variant.as_str(), category);
            async move { (variant, store.find(&query).await) }
        }))
        .buffered(self.options.fuzzy_concurrency.max(1));

        let mut report = FuzzyReport::default();
        let mut candidates = Vec::new();

        while let Some((variant, result)) = queries.next().await {
            report.variants_tried += 1;
            match result {
                Ok(records) => {
                    if !records.is_empty() {
                        report.matched_variants.push(variant.clone());
                    }
                    candidates.extend(records);
                }
                Err(e) => {
                    warn!(variant = %variant, error = %e, "Variant query failed, skipping");
                    report.variants_failed += 1;
                }
            }
            ensure_current(ticket)?;
        }

        let records = dedupe_by_id(candidates);
        debug!(
            term = %term,
            variants = report.variants_tried,
            failed = report.variants_failed,
            hits = records.len(),
            "Fuzzy pass finished"
        );

        Ok(SearchOutcome {
            pass: SearchPass::Fuzzy,
            records,
            fuzzy: Some(report),
        })
    }
}

fn ensure_current(ticket: Option<&SearchTicket>) -> Result<()> {
    match ticket {
        Some(ticket) if !ticket.is_current() => Err(SearchError::Superseded),
        _ => Ok(()),
    }
}

/// Drop records whose id was already seen, keeping the first occurrence.
#[must_use]
pub fn dedupe_by_id(records: Vec<MatchRecord>) -> Vec<MatchRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::testing::{artwork, ScriptedStore};
    use crate::variants::typo_variants;
    use tokio_test::block_on;

    fn ids(outcome: &SearchOutcome) -> Vec<&str> {
        outcome.records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_exact_hit_skips_fuzzy_pass() {
        let store = ScriptedStore::new().answer(
            Some("monet"),
            vec![
                artwork("m3", "Monet III", 3),
                artwork("m2", "Monet II", 2),
                artwork("m1", "Monet I", 1),
            ],
        );
        let executor = SearchExecutor::new(store);

        let outcome = block_on(executor.search("monet", "all")).unwrap();

        assert_eq!(outcome.pass, SearchPass::Exact);
        assert_eq!(ids(&outcome), vec!["m3", "m2", "m1"]);
        assert!(outcome.fuzzy.is_none());
        assert_eq!(executor.store().call_count(), 1);
    }

    #[test]
    fn test_typo_recovers_through_variant() {
        let store = ScriptedStore::new().answer(
            Some("monet"),
            vec![artwork("m2", "Monet II", 2), artwork("m1", "Monet I", 1)],
        );
        let executor = SearchExecutor::new(store);

        let outcome = block_on(executor.search("monett", "all")).unwrap();

        assert_eq!(outcome.pass, SearchPass::Fuzzy);
        assert_eq!(ids(&outcome), vec!["m2", "m1"]);
        let report = outcome.fuzzy.unwrap();
        assert_eq!(report.matched_variants, vec!["monet".to_string()]);
        assert_eq!(report.variants_failed, 0);
    }

    #[test]
    fn test_empty_term_browses_category() {
        let store = ScriptedStore::new().answer(None, vec![artwork("p1", "Still Life", 1)]);
        let executor = SearchExecutor::new(store);

        let outcome = block_on(executor.search("", "paintings")).unwrap();

        assert_eq!(outcome.pass, SearchPass::Browse);
        assert_eq!(ids(&outcome), vec!["p1"]);
        assert_eq!(
            executor.store().calls(),
            vec![RecordQuery::browse(Some("paintings"))]
        );
    }

    #[test]
    fn test_no_matches_anywhere() {
        let executor = SearchExecutor::new(ScriptedStore::new());

        let outcome = block_on(executor.search("xyzxyz", "all")).unwrap();

        assert!(outcome.is_empty());
        assert!(outcome.used_typo_tolerance());
    }

    #[test]
    fn test_exact_pass_error_propagates() {
        let store = ScriptedStore::new().fail(Some("monet"));
        let executor = SearchExecutor::new(store);

        let result = block_on(executor.search("monet", "all"));

        assert_eq!(
            result,
            Err(SearchError::Store(StoreError::backend("scripted failure")))
        );
        assert_eq!(executor.store().call_count(), 1);
    }

    #[test]
    fn test_browse_error_propagates() {
        let executor = SearchExecutor::new(ScriptedStore::new().fail(None));
        assert!(block_on(executor.search("  ", "all")).is_err());
    }

    #[test]
    fn test_fuzzy_failures_are_swallowed() {
        let store = ScriptedStore::new()
            .answer(Some("monett"), vec![])
            .fail_unscripted();
        let executor = SearchExecutor::new(store);

        let outcome = block_on(executor.search("monett", "all")).unwrap();

        assert!(outcome.is_empty());
        let report = outcome.fuzzy.unwrap();
        assert_eq!(report.variants_failed, report.variants_tried);
        assert!(report.variants_tried > 0);
    }

    #[test]
    fn test_results_deduplicated_across_variants() {
        let shared = artwork("shared", "Water Lilies", 4);
        let store = ScriptedStore::new()
            .answer(Some("monet"), vec![shared.clone(), artwork("m1", "Monet I", 1)])
            .answer(Some("moett"), vec![shared.clone()])
            .answer(Some("montt"), vec![shared]);
        let executor = SearchExecutor::new(store);

        let outcome = block_on(executor.search("monett", "all")).unwrap();

        // "moett" and "montt" come before "monet" in deletion order
        assert_eq!(ids(&outcome), vec!["shared", "m1"]);
    }

    #[test]
    fn test_fuzzy_queries_capped() {
        let term = "impressionism";
        assert!(typo_variants(term).len() > MAX_FUZZY_QUERIES);

        let executor = SearchExecutor::with_options(
            ScriptedStore::new(),
            SearchOptions::default().with_max_variants(500),
        );
        block_on(executor.search(term, "all")).unwrap();

        // one exact query plus the capped fuzzy pass
        assert_eq!(executor.store().call_count(), 1 + MAX_FUZZY_QUERIES);
    }

    #[test]
    fn test_category_applied_to_every_pass() {
        let executor = SearchExecutor::new(ScriptedStore::new());
        block_on(executor.search("rodin", "sculpture")).unwrap();

        let calls = executor.store().calls();
        assert!(calls.len() > 1);
        assert!(calls
            .iter()
            .all(|q| q.category.as_deref() == Some("sculpture") && q.approved_only));
    }

    #[test]
    fn test_concurrent_fuzzy_pass_matches_sequential() {
        let script = || {
            ScriptedStore::new()
                .answer(Some("monet"), vec![artwork("a", "A", 3), artwork("b", "B", 2)])
                .answer(Some("onett"), vec![artwork("b", "B", 2), artwork("c", "C", 1)])
                .fail(Some("mnett"))
        };

        let sequential = SearchExecutor::new(script());
        let concurrent = SearchExecutor::with_options(
            script(),
            SearchOptions::default().with_fuzzy_concurrency(8),
        );

        let a = block_on(sequential.search("monett", "all")).unwrap();
        let b = block_on(concurrent.search("monett", "all")).unwrap();

        assert_eq!(a, b);
        assert_eq!(ids(&a), vec!["b", "c", "a"]);
        assert_eq!(a.fuzzy.unwrap().variants_failed, 1);
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let first = artwork("x", "First", 1);
        let second = MatchRecord {
            title: "Second".to_string(),
            ..first.clone()
        };
        let deduped = dedupe_by_id(vec![first, second, artwork("y", "Other", 2)]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "First");
    }
}
