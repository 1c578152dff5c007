//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL for the networked tier (None = fallback-only mode)
    pub redis_url: Option<String>,
    /// Timeout in milliseconds for each networked-tier call
    pub redis_timeout_ms: u64,
    /// Default TTL in seconds for categories without a known policy
    pub default_ttl: u64,
    /// Maximum number of entries the fallback map can hold
    pub max_fallback_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background fallback-eviction interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Networked-tier connection URL (default: unset, fallback-only)
    /// - `REDIS_TIMEOUT_MS` - Per-call timeout in milliseconds (default: 2000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `MAX_FALLBACK_ENTRIES` - Fallback map capacity (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Eviction frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            redis_timeout_ms: env::var("REDIS_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            max_fallback_entries: env::var("MAX_FALLBACK_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            redis_timeout_ms: 2000,
            default_ttl: 300,
            max_fallback_entries: 10_000,
            server_port: 3000,
            cleanup_interval: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.redis_url.is_none());
        assert_eq!(config.redis_timeout_ms, 2000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.max_fallback_entries, 10_000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 30);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("REDIS_URL");
        env::remove_var("REDIS_TIMEOUT_MS");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("MAX_FALLBACK_ENTRIES");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert!(config.redis_url.is_none());
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 30);
    }
}
