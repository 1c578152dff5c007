//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{HealthStatus, MetricsSnapshot};

/// Response body for the GET operation (GET /cache/:category/:identifier)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The cached-data category
    pub category: String,
    /// Identifier within the category
    pub identifier: String,
    /// The cached value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(category: impl Into<String>, identifier: impl Into<String>, value: Value) -> Self {
        Self {
            category: category.into(),
            identifier: identifier.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /cache)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Whether the value was cached
    pub cached: bool,
    /// Success message
    pub message: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(category: &str, identifier: &str, cached: bool) -> Self {
        let message = if cached {
            format!("Cached '{}' under category '{}'", identifier, category)
        } else {
            format!(
                "Value for '{}' in category '{}' could not be serialized",
                identifier, category
            )
        };
        Self { cached, message }
    }
}

/// Response body for the DELETE operation (DELETE /cache/:category/:identifier)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Whether an entry was removed from either tier
    pub removed: bool,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(removed: bool) -> Self {
        Self { removed }
    }
}

/// Response body for category invalidation (POST /invalidate/:category)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// The invalidated category
    pub category: String,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(category: impl Into<String>, removed: usize) -> Self {
        Self {
            category: category.into(),
            removed,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
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

impl From<MetricsSnapshot> for StatsResponse {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self {
            requests: snapshot.requests,
            hits: snapshot.hits,
            misses: snapshot.misses,
            hit_rate: snapshot.hit_rate,
            avg_latency_ms: snapshot.avg_latency_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status string
    pub status: String,
    /// Whether the networked tier answered the probe
    pub networked_tier_connected: bool,
    /// Whether reads are currently served from the fallback tier
    pub fallback_active: bool,
    /// Hit rate as a percentage
    pub hit_rate_percent: f64,
    /// Entries currently held by the fallback tier
    pub keys_count: usize,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl From<HealthStatus> for HealthResponse {
    fn from(health: HealthStatus) -> Self {
        let status = if health.networked_tier_connected {
            "healthy"
        } else {
            "degraded"
        };
        Self {
            status: status.to_string(),
            networked_tier_connected: health.networked_tier_connected,
            fallback_active: health.fallback_active,
            hit_rate_percent: health.hit_rate_percent,
            keys_count: health.keys_count,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
