//! In-process search metrics

use crate::logging::session_id;
use artmarket_search::{SearchOutcome, SearchPass};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// Get the global metrics registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

/// Metric names recorded for searches
pub mod names {
    /// Searches run
    pub const SEARCHES: &str = "search.total";
    /// Searches answered by the exact pass
    pub const EXACT_HITS: &str = "search.exact_hits";
    /// Searches that fell through to typo variants
    pub const FUZZY_PASSES: &str = "search.fuzzy_passes";
    /// Searches that found nothing
    pub const EMPTY_RESULTS: &str = "search.empty";
    /// Variant queries issued
    pub const VARIANTS_TRIED: &str = "search.variants_tried";
    /// Variant queries that failed and were skipped
    pub const VARIANTS_FAILED: &str = "search.variants_failed";
    /// Searches that ended in an error
    pub const ERRORS: &str = "search.errors";
    /// End-to-end search latency
    pub const LATENCY: &str = "search.latency";
}

/// Counters and latency samples keyed by static metric names
pub struct MetricsRegistry {
    counters: RwLock<HashMap<&'static str, AtomicU64>>,
    latencies: Mutex<HashMap<&'static str, Vec<Duration>>>,
    started: Instant,
}

impl MetricsRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            latencies: Mutex::new(HashMap::new()),
            started: Instant::now(),
        }
    }

    /// Add `by` to a counter
    pub fn add(&self, name: &'static str, by: u64) {
        {
            let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(counter) = counters.get(name) {
                counter.fetch_add(by, Ordering::Relaxed);
                return;
            }
        }
        self.counters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name)
            .or_default()
            .fetch_add(by, Ordering::Relaxed);
    }

    /// Current value of a counter (0 if never incremented)
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Record a latency sample
    pub fn observe(&self, name: &'static str, elapsed: Duration) {
        self.latencies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name)
            .or_default()
            .push(elapsed);
    }

    /// Summary of the latency samples recorded under `name`
    pub fn latency(&self, name: &str) -> LatencySummary {
        let latencies = self.latencies.lock().unwrap_or_else(PoisonError::into_inner);
        LatencySummary::of(latencies.get(name).map_or(&[][..], Vec::as_slice))
    }

    /// Record one completed search
    pub fn record_search(&self, outcome: &SearchOutcome, elapsed: Duration) {
        self.add(names::SEARCHES, 1);
        match outcome.pass {
            SearchPass::Exact => self.add(names::EXACT_HITS, 1),
            SearchPass::Fuzzy => self.add(names::FUZZY_PASSES, 1),
            SearchPass::Browse => {}
        }
        if outcome.is_empty() {
            self.add(names::EMPTY_RESULTS, 1);
        }
        if let Some(ref report) = outcome.fuzzy {
            self.add(names::VARIANTS_TRIED, report.variants_tried as u64);
            self.add(names::VARIANTS_FAILED, report.variants_failed as u64);
        }
        self.observe(names::LATENCY, elapsed);
    }

    /// Record a search that failed
    pub fn record_search_error(&self, elapsed: Duration) {
        self.add(names::SEARCHES, 1);
        self.add(names::ERRORS, 1);
        self.observe(names::LATENCY, elapsed);
    }

    /// Snapshot as JSON, with names sorted
    pub fn export_json(&self) -> serde_json::Value {
        let counters: BTreeMap<&str, u64> = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, value)| (*name, value.load(Ordering::Relaxed)))
            .collect();

        let latencies: BTreeMap<&str, LatencySummary> = self
            .latencies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, samples)| (*name, LatencySummary::of(samples)))
            .collect();

        serde_json::json!({
            "session_id": session_id(),
            "uptime_secs": self.started.elapsed().as_secs(),
            "counters": counters,
            "latency_ms": latencies,
        })
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Latency distribution in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LatencySummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
}

impl LatencySummary {
    fn of(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let ms = |d: Duration| d.as_nanos() as f64 / 1_000_000.0;
        // nearest-rank
        let rank = |p: usize| sorted[(p * sorted.len()).div_ceil(100).saturating_sub(1)];

        let total: Duration = sorted.iter().sum();
        Self {
            count: sorted.len(),
            min: ms(sorted[0]),
            max: ms(sorted[sorted.len() - 1]),
            mean: ms(total) / sorted.len() as f64,
            p50: ms(rank(50)),
            p95: ms(rank(95)),
        }
    }
}

/// Measures one operation and feeds the registry when stopped
pub struct Timer {
    name: &'static str,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Time elapsed so far, without recording
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and record the duration
    pub fn stop(self) -> Duration {
        let elapsed = self.start.elapsed();
        metrics().observe(self.name, elapsed);
        tracing::debug!(
            metric = self.name,
            duration_ms = elapsed.as_millis(),
            "Timer completed"
        );
        elapsed
    }
}
