//! Tiercache - A category-aware two-tier result cache
//!
//! Redis primary tier with an in-process fallback, per-category TTL and
//! serialization policies, and cache effectiveness metrics.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheService;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
