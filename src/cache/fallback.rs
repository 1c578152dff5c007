//! Fallback Store Module
//!
//! In-process expiring map serving as the secondary cache tier. Every `set`
//! writes here regardless of networked-tier availability, so degraded reads
//! stay correct within the same TTL window.

use std::collections::HashMap;

use crate::cache::entry::FallbackEntry;

// == Fallback Store ==
/// Process-local key-value store with per-entry expiry and a capacity bound.
///
/// Not thread-safe on its own; the tiered store wraps it in a
/// `tokio::sync::RwLock`.
#[derive(Debug)]
pub struct FallbackStore {
    /// Key-value storage
    entries: HashMap<String, FallbackEntry>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entries evicted to make room (capacity pressure, not expiry)
    evictions: u64,
}

impl FallbackStore {
    // == Constructor ==
    /// Creates an empty store bounded to `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            evictions: 0,
        }
    }

    // == Get ==
    /// Returns the serialized payload for `key` if present and not expired.
    ///
    /// Expired entries are evicted on sight and reported absent.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.raw_bytes.clone()),
            None => None,
        }
    }

    // == Set ==
    /// Stores a serialized payload under `key` with the given TTL.
    ///
    /// Overwrites any existing entry. At capacity, expired entries are purged
    /// first; if the store is still full, the soonest-expiring entry is
    /// evicted (it is the least useful one to keep).
    pub fn set(&mut self, key: String, raw_bytes: Vec<u8>, ttl_seconds: u64) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if self.cleanup_expired() == 0 {
                if let Some(victim) = self
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.expires_at)
                    .map(|(k, _)| k.clone())
                {
                    self.entries.remove(&victim);
                    self.evictions += 1;
                }
            }
        }

        self.entries
            .insert(key, FallbackEntry::new(raw_bytes, ttl_seconds));
    }

    // == Delete ==
    /// Removes an entry by key; returns true if it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Delete Containing ==
    /// Removes all entries whose key contains `fragment`.
    ///
    /// This is the fallback-tier counterpart of the networked tier's glob
    /// pattern delete; substring matching is acceptable for bulk
    /// invalidation.
    pub fn delete_containing(&mut self, fragment: &str) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.contains(fragment))
            .cloned()
            .collect();

        let count = matching.len();
        for key in matching {
            self.entries.remove(&key);
        }
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries; returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            self.entries.remove(&key);
        }
        count
    }

    // == Length ==
    /// Returns the current number of entries (including any not yet swept).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Evictions ==
    /// Returns the number of capacity evictions performed so far.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
