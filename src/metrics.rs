//! Enrichment metrics.
//!
//! Counters for resources passing through the locale info normalizer. One
//! instance is shared (via `Arc`) by every normalizer of a pipeline.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct EnrichmentMetrics {
    /// Resources handed to the normalizer
    resources_seen: AtomicUsize,

    /// Resources that received a `localeInfo` member
    resources_decorated: AtomicUsize,

    /// Resources left untouched because they are not eligible
    resources_skipped: AtomicUsize,

    /// Alias lookups performed
    alias_lookups: AtomicUsize,

    /// Alias lookups that failed
    alias_failures: AtomicUsize,
}

impl EnrichmentMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_resource_seen(&self) {
        self.resources_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decorated(&self) {
        self.resources_decorated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.resources_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alias_lookup(&self) {
        self.alias_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alias_failure(&self) {
        self.alias_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resources_seen(&self) -> usize {
        self.resources_seen.load(Ordering::Relaxed)
    }

    pub fn resources_decorated(&self) -> usize {
        self.resources_decorated.load(Ordering::Relaxed)
    }

    pub fn resources_skipped(&self) -> usize {
        self.resources_skipped.load(Ordering::Relaxed)
    }

    pub fn alias_lookups(&self) -> usize {
        self.alias_lookups.load(Ordering::Relaxed)
    }

    pub fn alias_failures(&self) -> usize {
        self.alias_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let seen = self.resources_seen();
        let decorated = self.resources_decorated();
        let decorated_rate = if seen > 0 {
            (decorated as f64 / seen as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            resources_seen: seen,
            resources_decorated: decorated,
            resources_skipped: self.resources_skipped(),
            decorated_rate,
            alias_lookups: self.alias_lookups(),
            alias_failures: self.alias_failures(),
        }
    }
}

/// Snapshot of enrichment statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub resources_seen: usize,
    pub resources_decorated: usize,
    pub resources_skipped: usize,

    /// Share of seen resources that were decorated, as a percentage (0-100)
    pub decorated_rate: f64,

    pub alias_lookups: usize,
    pub alias_failures: usize,
}
