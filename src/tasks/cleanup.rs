//! Fallback Eviction Task
//!
//! Background task that periodically removes expired entries from the
//! in-process fallback tier. The networked tier expires keys natively, so
//! only the fallback map needs sweeping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::FallbackStore;

/// Spawns a background task that periodically evicts expired fallback entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Expired entries are also evicted lazily on read, so the
/// sweep exists to bound growth of entries nobody reads again.
///
/// # Arguments
/// * `fallback` - shared handle to the fallback tier
/// * `cleanup_interval_secs` - interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
pub fn spawn_cleanup_task(
    fallback: Arc<RwLock<FallbackStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting fallback eviction task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            // Acquire write lock and evict expired entries
            let removed = {
                let mut fallback_guard = fallback.write().await;
                fallback_guard.cleanup_expired()
            };

            // Log sweep statistics
            if removed > 0 {
                info!("Fallback eviction: removed {} expired entries", removed);
            } else {
                debug!("Fallback eviction: no expired entries found");
            }
        }
    })
}
