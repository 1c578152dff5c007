//! Fallback Entry Module
//!
//! Defines the structure of individual entries in the in-process fallback tier.

use std::time::{SystemTime, UNIX_EPOCH};

// == Fallback Entry ==
/// A single entry in the fallback map: serialized payload plus expiry metadata.
///
/// Payloads are stored already serialized (JSON or MessagePack per the
/// category policy) so both tiers hold identical bytes.
#[derive(Debug, Clone)]
pub struct FallbackEntry {
    /// The serialized payload
    pub raw_bytes: Vec<u8>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl FallbackEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now.
    pub fn new(raw_bytes: Vec<u8>, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            raw_bytes,
            created_at: now,
            expires_at: now + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to the expiration time, so once the TTL has
    /// fully elapsed the entry must not be returned.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds (0 if already expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
