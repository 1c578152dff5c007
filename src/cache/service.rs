//! Cache Service Module
//!
//! The internal API request handlers call: category-aware get/set/delete,
//! category invalidation, and a health check. Combines the key builder,
//! policy table, codec, tiered store, and metrics.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::cache::codec;
use crate::cache::key::build_key;
use crate::cache::metrics::{CacheMetrics, MetricsSnapshot};
use crate::cache::policy::{Category, CategoryPolicy};
use crate::cache::store::TieredStore;
use crate::config::Config;
use crate::error::Result;

// == Cache Service ==
/// Category-aware cache facade over the tiered store.
///
/// Explicitly constructed and passed by handle to request handlers; there is
/// no ambient singleton.
pub struct CacheService {
    store: TieredStore,
    metrics: CacheMetrics,
    /// TTL applied to categories without a dedicated policy
    default_ttl: u64,
}

impl CacheService {
    // == Constructor ==
    /// Creates a service over an already-built store.
    pub fn new(store: TieredStore, default_ttl: u64) -> Self {
        Self {
            store,
            metrics: CacheMetrics::new(),
            default_ttl,
        }
    }

    /// Creates a service from configuration, probing the networked tier.
    pub async fn from_config(config: &Config) -> Self {
        let store = TieredStore::connect(config).await;
        Self::new(store, config.default_ttl)
    }

    /// Resolves the policy for a category name, using the configured default
    /// TTL for unknown categories.
    fn policy_for(&self, category: &str) -> CategoryPolicy {
        match Category::parse(category) {
            Some(cat) => cat.policy(),
            None => CategoryPolicy {
                ttl_seconds: self.default_ttl,
                compress: false,
            },
        }
    }

    // == Get ==
    /// Looks up a cached value; `None` means absent, expired, or undecodable.
    ///
    /// Corrupt payloads are logged and reported as a miss so the caller
    /// recomputes; only invalid inputs (empty category/identifier) produce an
    /// error.
    pub async fn get<T: DeserializeOwned>(
        &self,
        category: &str,
        identifier: &str,
        params: &[(String, String)],
    ) -> Result<Option<T>> {
        let key = build_key(category, identifier, params)?;
        let policy = self.policy_for(category);

        let start = Instant::now();
        self.metrics.record_request();

        let result = match self.store.get_bytes(&key).await {
            Some(bytes) => match codec::deserialize(&bytes, policy.compress) {
                Ok(value) => {
                    self.metrics.record_hit();
                    debug!(category, key, "Cache hit");
                    Some(value)
                }
                Err(e) => {
                    // Undecodable payload is a miss, never a caller-visible failure
                    error!(category, key, "Failed to decode cached payload: {}", e);
                    self.metrics.record_miss();
                    None
                }
            },
            None => {
                self.metrics.record_miss();
                debug!(category, key, "Cache miss");
                None
            }
        };

        self.metrics
            .record_latency_us(start.elapsed().as_micros() as u64);
        Ok(result)
    }

    // == Set ==
    /// Caches a value under the category's policy, with an optional TTL
    /// override.
    ///
    /// Returns false when the value cannot be serialized; the store write
    /// itself cannot fail the operation while the fallback tier accepts it.
    pub async fn set<T: Serialize>(
        &self,
        category: &str,
        identifier: &str,
        value: &T,
        ttl: Option<u64>,
        params: &[(String, String)],
    ) -> Result<bool> {
        let key = build_key(category, identifier, params)?;
        let policy = self.policy_for(category);
        let ttl_seconds = ttl.unwrap_or(policy.ttl_seconds);

        let bytes = match codec::serialize(value, policy.compress) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(category, key, "Failed to encode value for caching: {}", e);
                return Ok(false);
            }
        };

        Ok(self.store.set_bytes(&key, bytes, ttl_seconds).await)
    }

    // == Delete ==
    /// Removes a single entry from both tiers; true if either tier had it.
    pub async fn delete(
        &self,
        category: &str,
        identifier: &str,
        params: &[(String, String)],
    ) -> Result<bool> {
        let key = build_key(category, identifier, params)?;
        Ok(self.store.delete(&key).await)
    }

    // == Invalidate Category ==
    /// Removes every entry of one category; returns the count removed.
    ///
    /// No cascading: invalidating "prediction" does not touch "market_data".
    pub async fn invalidate_category(&self, category: &str) -> Result<usize> {
        if category.is_empty() {
            return Err(crate::error::CacheError::InvalidRequest(
                "Category cannot be empty".to_string(),
            ));
        }
        Ok(self.store.delete_pattern(&format!("{}:*", category)).await)
    }

    // == Health Check ==
    /// Reports tier connectivity and cache effectiveness.
    pub async fn health_check(&self) -> HealthStatus {
        let networked_tier_connected = self.store.networked_connected().await;
        HealthStatus {
            networked_tier_connected,
            fallback_active: !networked_tier_connected,
            hit_rate_percent: self.metrics.snapshot().hit_rate,
            keys_count: self.store.fallback_len().await,
        }
    }

    // == Metrics ==
    /// Point-in-time metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// The underlying tiered store; the background eviction task takes its
    /// fallback handle from here.
    pub fn store(&self) -> &TieredStore {
        &self.store
    }
}

// == Health Status ==
/// Result of [`CacheService::health_check`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthStatus {
    /// Whether the networked tier answered the probe
    pub networked_tier_connected: bool,
    /// Whether reads are currently served from the fallback tier
    pub fallback_active: bool,
    /// Hit rate as a percentage
    pub hit_rate_percent: f64,
    /// Entries currently held by the fallback tier
    pub keys_count: usize,
}
