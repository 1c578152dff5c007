//! Cache Metrics Module
//!
//! Tracks cache effectiveness: request/hit/miss counters and read latency.
//! Counters are atomics so concurrent request handlers can record without a
//! lock; they reset only at process restart.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Metrics ==
/// Process-wide cache effectiveness counters.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Number of read requests
    requests: AtomicU64,
    /// Number of reads served from cache
    hits: AtomicU64,
    /// Number of reads that found nothing (absent or expired)
    misses: AtomicU64,
    /// Accumulated read latency in microseconds
    total_response_time_us: AtomicU64,
}

impl CacheMetrics {
    // == Constructor ==
    /// Creates a new metrics set with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Request ==
    /// Increments the request counter.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Latency ==
    /// Adds one read's latency to the accumulator.
    pub fn record_latency_us(&self, micros: u64) {
        self.total_response_time_us
            .fetch_add(micros, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Returns a point-in-time copy of the counters with derived rates.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests.load(Ordering::Relaxed);
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total_us = self.total_response_time_us.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests,
            hits,
            misses,
            hit_rate: hits as f64 / requests.max(1) as f64 * 100.0,
            avg_latency_ms: total_us as f64 / 1000.0 / requests.max(1) as f64,
        }
    }
}

// == Metrics Snapshot ==
/// Point-in-time view of the cache metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Number of read requests
    pub requests: u64,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Hit rate as a percentage (0.0 - 100.0)
    pub hit_rate: f64,
    /// Average read latency in milliseconds
    pub avg_latency_ms: f64,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let snapshot = CacheMetrics::new().snapshot();
        assert_eq!(snapshot.requests, 0);
        assert_eq!(snapshot.hits, 0);
        assert_eq!(snapshot.misses, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let snapshot = CacheMetrics::new().snapshot();
        // max(requests, 1) guards the division
        assert_eq!(snapshot.hit_rate, 0.0);
        assert_eq!(snapshot.avg_latency_ms, 0.0);
    }

    #[test]
    fn test_hit_rate_is_percentage() {
        let metrics = CacheMetrics::new();

        metrics.record_request();
        metrics.record_miss();
        metrics.record_request();
        metrics.record_hit();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 2);
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.hit_rate, 50.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let metrics = CacheMetrics::new();
        for _ in 0..3 {
            metrics.record_request();
            metrics.record_hit();
        }
        assert_eq!(metrics.snapshot().hit_rate, 100.0);
    }

    #[test]
    fn test_avg_latency() {
        let metrics = CacheMetrics::new();

        metrics.record_request();
        metrics.record_latency_us(1500);
        metrics.record_request();
        metrics.record_latency_us(2500);

        let snapshot = metrics.snapshot();
        assert!((snapshot.avg_latency_ms - 2.0).abs() < 1e-9);
    }
}
