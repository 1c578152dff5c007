//! Tiered Store Module
//!
//! The only module that touches persistence: a networked Redis primary tier
//! plus the in-process fallback map. Writes go through to both tiers;
//! networked-tier failures are logged and absorbed, never raised to callers.

use std::sync::Arc;
use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::fallback::FallbackStore;
use crate::config::Config;
use crate::error::Result;

// == Tiered Store ==
/// Two-tier key-value store: Redis primary, in-process fallback.
///
/// The startup probe decides the persistent mode: a reachable Redis yields a
/// connected store, an unreachable one a degraded (fallback-only) store.
/// After startup, a transient Redis error on any single operation falls back
/// for that call only; the next operation retries Redis naturally. There is
/// no permanent demotion past the startup probe.
pub struct TieredStore {
    /// Networked tier connection (None = degraded since startup)
    redis: Option<ConnectionManager>,
    /// In-process fallback tier
    fallback: Arc<RwLock<FallbackStore>>,
    /// Bound on every networked-tier call
    op_timeout: Duration,
}

impl TieredStore {
    // == Connect ==
    /// Builds a store from configuration, probing the networked tier once.
    ///
    /// A missing `REDIS_URL` or a failed probe logs a warning and yields a
    /// fallback-only store; it never fails startup.
    pub async fn connect(config: &Config) -> Self {
        let op_timeout = Duration::from_millis(config.redis_timeout_ms);

        let redis = match &config.redis_url {
            Some(url) => match Self::probe_connect(url, op_timeout).await {
                Ok(conn) => {
                    info!("Connected to networked cache tier");
                    Some(conn)
                }
                Err(e) => {
                    warn!("Networked cache tier unreachable, running fallback-only: {}", e);
                    None
                }
            },
            None => {
                info!("REDIS_URL not set, running fallback-only");
                None
            }
        };

        Self {
            redis,
            fallback: Arc::new(RwLock::new(FallbackStore::new(config.max_fallback_entries))),
            op_timeout,
        }
    }

    // == Fallback Only ==
    /// Builds a store with no networked tier. Used when Redis is not
    /// configured and by tests.
    pub fn fallback_only(max_fallback_entries: usize) -> Self {
        Self {
            redis: None,
            fallback: Arc::new(RwLock::new(FallbackStore::new(max_fallback_entries))),
            op_timeout: Duration::from_millis(2000),
        }
    }

    /// Opens a connection and verifies it with a PING, bounded by `timeout`.
    async fn probe_connect(url: &str, timeout: Duration) -> Result<ConnectionManager> {
        let client = redis::Client::open(url)?;
        let mut conn = Self::bounded(timeout, ConnectionManager::new(client)).await??;
        let _: String = Self::bounded(timeout, redis::cmd("PING").query_async(&mut conn)).await??;
        Ok(conn)
    }

    /// Bounds a networked-tier future by the configured timeout.
    async fn bounded<F, T>(timeout: Duration, fut: F) -> Result<redis::RedisResult<T>>
    where
        F: std::future::Future<Output = redis::RedisResult<T>>,
    {
        tokio::time::timeout(timeout, fut).await.map_err(|_| {
            crate::error::CacheError::TransientStore("networked tier timed out".to_string())
        })
    }

    // == Get ==
    /// Returns the serialized payload for `key` from the first tier that has
    /// a live entry.
    ///
    /// A networked-tier error degrades this call only: the fallback map is
    /// consulted and the error logged at warning level.
    pub async fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(conn) = &self.redis {
            let mut conn = conn.clone();
            match Self::bounded(self.op_timeout, conn.get::<_, Option<Vec<u8>>>(key)).await {
                Ok(Ok(Some(bytes))) => return Some(bytes),
                Ok(Ok(None)) => {
                    debug!(key, "Not in networked tier, consulting fallback");
                }
                Ok(Err(e)) => {
                    warn!(key, "Networked tier get failed, consulting fallback: {}", e);
                }
                Err(e) => {
                    warn!(key, "Networked tier get timed out, consulting fallback: {}", e);
                }
            }
        }

        self.fallback.write().await.get(key)
    }

    // == Set ==
    /// Writes a serialized payload to both tiers with the given TTL.
    ///
    /// The networked write is best-effort; the fallback write always happens
    /// (write-through), so a degraded read within the TTL window still sees
    /// the value. Returns false only if neither tier accepted the write.
    pub async fn set_bytes(&self, key: &str, bytes: Vec<u8>, ttl_seconds: u64) -> bool {
        if let Some(conn) = &self.redis {
            let mut conn = conn.clone();
            match Self::bounded(
                self.op_timeout,
                conn.set_ex::<_, _, ()>(key, bytes.as_slice(), ttl_seconds),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(key, "Networked tier set failed: {}", e),
                Err(e) => warn!(key, "Networked tier set timed out: {}", e),
            }
        }

        self.fallback
            .write()
            .await
            .set(key.to_string(), bytes, ttl_seconds);
        true
    }

    // == Delete ==
    /// Removes `key` from both tiers; returns true if either tier had it.
    pub async fn delete(&self, key: &str) -> bool {
        let mut removed_networked = false;

        if let Some(conn) = &self.redis {
            let mut conn = conn.clone();
            match Self::bounded(self.op_timeout, conn.del::<_, u64>(key)).await {
                Ok(Ok(n)) => removed_networked = n > 0,
                Ok(Err(e)) => warn!(key, "Networked tier delete failed: {}", e),
                Err(e) => warn!(key, "Networked tier delete timed out: {}", e),
            }
        }

        let removed_fallback = self.fallback.write().await.delete(key);
        removed_networked || removed_fallback
    }

    // == Delete Pattern ==
    /// Bulk-removes keys matching a glob pattern (prefix/suffix `*`).
    ///
    /// The networked tier uses SCAN with the glob; the fallback map removes
    /// keys containing the pattern's literal substring. Both tiers hold the
    /// same logical entries under write-through, so the count reported is the
    /// larger of the two (not the sum).
    pub async fn delete_pattern(&self, pattern: &str) -> usize {
        let mut networked_count = 0usize;

        if let Some(conn) = &self.redis {
            match self.delete_pattern_networked(conn.clone(), pattern).await {
                Ok(n) => networked_count = n,
                Err(e) => warn!(pattern, "Networked tier pattern delete failed: {}", e),
            }
        }

        let fragment = pattern.trim_matches('*');
        let fallback_count = self.fallback.write().await.delete_containing(fragment);

        networked_count.max(fallback_count)
    }

    /// SCAN + DEL on the networked tier.
    ///
    /// The whole scan-and-collect is bounded, not just obtaining the
    /// iterator: every cursor advance is a further round trip on the
    /// connection, and a stall mid-scan must not park the caller.
    async fn delete_pattern_networked(
        &self,
        mut conn: ConnectionManager,
        pattern: &str,
    ) -> Result<usize> {
        let keys: Vec<String> = Self::bounded(self.op_timeout, async {
            let mut iter = conn.scan_match(pattern).await?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            Ok(keys)
        })
        .await??;

        if keys.is_empty() {
            return Ok(0);
        }

        let removed: u64 =
            Self::bounded(self.op_timeout, conn.del(keys.as_slice())).await??;
        Ok(removed as usize)
    }

    // == Health ==
    /// True when the networked tier answers a PING right now.
    pub async fn networked_connected(&self) -> bool {
        match &self.redis {
            Some(conn) => {
                let mut conn = conn.clone();
                let pong: Result<redis::RedisResult<String>> =
                    Self::bounded(self.op_timeout, redis::cmd("PING").query_async(&mut conn)).await;
                matches!(pong, Ok(Ok(_)))
            }
            None => false,
        }
    }

    /// True when the store started without a networked tier.
    pub fn is_degraded(&self) -> bool {
        self.redis.is_none()
    }

    /// Number of entries currently held by the fallback tier.
    pub async fn fallback_len(&self) -> usize {
        self.fallback.read().await.len()
    }

    /// Shared handle to the fallback tier, for the background eviction task.
    pub fn fallback(&self) -> Arc<RwLock<FallbackStore>> {
        self.fallback.clone()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Spawns a scripted stand-in for the networked tier: answers every
    /// command with `+OK` until it sees a SCAN, then holds the socket open
    /// without ever replying.
    async fn spawn_stalling_server() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(_) => return,
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    loop {
                        let n = match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => n,
                        };
                        let chunk = &buf[..n];
                        if chunk.windows(4).any(|w| w == b"SCAN") {
                            std::future::pending::<()>().await;
                        }
                        // One reply per command; commands arrive as RESP
                        // arrays, each starting with '*'
                        let commands = chunk.iter().filter(|&&b| b == b'*').count().max(1);
                        for _ in 0..commands {
                            if socket.write_all(b"+OK\r\n").await.is_err() {
                                return;
                            }
                        }
                    }
                });
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_fallback_only_set_and_get() {
        let store = TieredStore::fallback_only(100);

        assert!(store.set_bytes("prediction:m1", b"payload".to_vec(), 300).await);
        let bytes = store.get_bytes("prediction:m1").await;
        assert_eq!(bytes, Some(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn test_fallback_only_get_absent() {
        let store = TieredStore::fallback_only(100);
        assert!(store.get_bytes("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_fallback_only_delete() {
        let store = TieredStore::fallback_only(100);

        store.set_bytes("k", b"v".to_vec(), 300).await;
        assert!(store.delete("k").await);
        assert!(!store.delete("k").await);
        assert!(store.get_bytes("k").await.is_none());
    }

    #[tokio::test]
    async fn test_fallback_only_delete_pattern() {
        let store = TieredStore::fallback_only(100);

        store.set_bytes("prediction:m1", b"a".to_vec(), 300).await;
        store.set_bytes("prediction:m2", b"b".to_vec(), 300).await;
        store.set_bytes("market_data:AAPL", b"c".to_vec(), 300).await;

        let removed = store.delete_pattern("prediction:*").await;
        assert_eq!(removed, 2);
        assert!(store.get_bytes("prediction:m1").await.is_none());
        assert!(store.get_bytes("market_data:AAPL").await.is_some());
    }

    #[tokio::test]
    async fn test_fallback_only_ttl_expiry() {
        let store = TieredStore::fallback_only(100);

        store.set_bytes("k", b"v".to_vec(), 1).await;
        assert!(store.get_bytes("k").await.is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(store.get_bytes("k").await.is_none());
    }

    #[tokio::test]
    async fn test_fallback_only_health() {
        let store = TieredStore::fallback_only(100);
        assert!(store.is_degraded());
        assert!(!store.networked_connected().await);
        assert_eq!(store.fallback_len().await, 0);
    }

    #[tokio::test]
    async fn test_connect_without_url_is_degraded() {
        let config = Config::default();
        let store = TieredStore::connect(&config).await;
        assert!(store.is_degraded());
    }

    #[tokio::test]
    async fn test_delete_pattern_bounded_when_scan_stalls() {
        let addr = spawn_stalling_server().await;
        let config = Config {
            redis_url: Some(format!("redis://{}/", addr)),
            redis_timeout_ms: 300,
            ..Config::default()
        };
        let store = TieredStore::connect(&config).await;
        assert!(!store.is_degraded(), "Probe should succeed against the server");

        store.set_bytes("prediction:m1", b"a".to_vec(), 300).await;
        store.set_bytes("prediction:m2", b"b".to_vec(), 300).await;

        // The scan stalls mid-flight; the operation must return within the
        // op timeout and still invalidate the fallback tier
        let started = std::time::Instant::now();
        let removed = store.delete_pattern("prediction:*").await;

        assert!(
            started.elapsed() < Duration::from_secs(2),
            "Pattern delete must be bounded by the op timeout"
        );
        assert_eq!(removed, 2);
        assert!(store.fallback().write().await.get("prediction:m1").is_none());
        assert!(store.fallback().write().await.get("prediction:m2").is_none());
    }

    #[tokio::test]
    async fn test_connect_unreachable_url_is_degraded() {
        let config = Config {
            redis_url: Some("redis://127.0.0.1:1/".to_string()),
            redis_timeout_ms: 200,
            ..Config::default()
        };
        let store = TieredStore::connect(&config).await;
        assert!(store.is_degraded());

        // Degraded store still serves the fallback tier
        assert!(store.set_bytes("k", b"v".to_vec(), 300).await);
        assert_eq!(store.get_bytes("k").await, Some(b"v".to_vec()));
    }
}
