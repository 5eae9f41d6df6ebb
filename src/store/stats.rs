//! Store Statistics Module
//!
//! Tracks read-path outcomes: hits, misses, expirations, and records that
//! failed to decode. Counters are atomic so every clone of a store feeds
//! the same tallies.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Counters ==
/// Shared atomic counters the store increments on every lookup.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    decode_failures: AtomicU64,
}

impl StatsCounters {
    /// Records a lookup that returned a fresh value.
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found no record.
    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found a stale record.
    pub(crate) fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found an undecodable record.
    pub(crate) fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of all counters.
    pub(crate) fn snapshot(&self) -> StoreStats {
        StoreStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
        }
    }
}

// == Store Stats ==
/// A point-in-time snapshot of store performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of lookups that returned a fresh value
    pub hits: u64,
    /// Number of lookups that found no record
    pub misses: u64,
    /// Number of lookups that found a stale record
    pub expirations: u64,
    /// Number of lookups that found an undecodable record
    pub decode_failures: u64,
}

impl StoreStats {
    // == Lookups ==
    /// Returns the total number of lookups observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses + self.expirations + self.decode_failures
    }

    // == Hit Rate ==
    /// Calculates the fraction of lookups that returned a fresh value.
    ///
    /// Returns hits / lookups, or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_starts_at_zero() {
        let counters = StatsCounters::default();
        let stats = counters.snapshot();

        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.decode_failures, 0);
        assert_eq!(stats.lookups(), 0);
    }

    #[test]
    fn test_counters_feed_snapshot() {
        let counters = StatsCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        counters.record_expiration();
        counters.record_decode_failure();

        let stats = counters.snapshot();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.decode_failures, 1);
        assert_eq!(stats.lookups(), 5);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        let stats = StoreStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let counters = StatsCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();

        assert_eq!(counters.snapshot().hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let counters = StatsCounters::default();
        counters.record_hit();
        counters.record_miss();
        counters.record_hit();
        counters.record_expiration();

        assert_eq!(counters.snapshot().hit_rate(), 0.5);
    }
}
