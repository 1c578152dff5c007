//! Cache Module
//!
//! Category-aware two-tier caching: deterministic key derivation, per-category
//! TTL/serialization policies, a Redis primary with in-process fallback, and
//! effectiveness metrics.

mod codec;
mod entry;
mod fallback;
mod key;
mod metrics;
mod policy;
mod service;
mod store;


// Re-export public types
pub use codec::{deserialize, serialize};
pub use entry::FallbackEntry;
pub use fallback::FallbackStore;
pub use key::build_key;
pub use metrics::{CacheMetrics, MetricsSnapshot};
pub use policy::{Category, CategoryPolicy};
pub use service::{CacheService, HealthStatus};
pub use store::TieredStore;

// == Public Constants ==
/// Composed keys longer than this are replaced by a category-prefixed digest
/// to respect backing-store key-length limits.
pub const MAX_COMPOSED_KEY_LENGTH: usize = 250;
