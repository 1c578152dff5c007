//! Serialization Codec Module
//!
//! Converts in-memory values to bytes and back, honoring the category's
//! `compress` flag: JSON for human-readable storage, MessagePack for compact
//! binary storage.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

// == Serialize ==
/// Serializes `value` to bytes.
///
/// With `compress` set, uses MessagePack. Otherwise attempts JSON first and
/// falls back to MessagePack when the value is not JSON-representable
/// (e.g., non-string map keys), so a "no compression" policy never makes a
/// value uncacheable.
pub fn serialize<T: Serialize>(value: &T, compress: bool) -> Result<Vec<u8>> {
    if compress {
        return rmp_serde::to_vec_named(value)
            .map_err(|e| CacheError::Serialization(e.to_string()));
    }

    match serde_json::to_vec(value) {
        Ok(bytes) => Ok(bytes),
        Err(_) => rmp_serde::to_vec_named(value)
            .map_err(|e| CacheError::Serialization(e.to_string())),
    }
}

// == Deserialize ==
/// Deserializes bytes produced by [`serialize`].
///
/// Mirrors the write path: with `compress` unset, JSON is tried first and
/// MessagePack second, because some values written under a no-compression
/// policy were stored binary via the write-side fallback. Bytes neither
/// format accepts yield a `Serialization` error; callers treat that as a
/// cache miss.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8], compress: bool) -> Result<T> {
    if compress {
        return rmp_serde::from_slice(bytes)
            .map_err(|e| CacheError::Serialization(e.to_string()));
    }

    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(_) => rmp_serde::from_slice(bytes)
            .map_err(|e| CacheError::Serialization(e.to_string())),
    }
}
