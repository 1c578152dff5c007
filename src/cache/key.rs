//! Cache Key Builder Module
//!
//! Derives deterministic, length-bounded storage keys from a logical
//! (category, identifier, params) request descriptor.

use sha2::{Digest, Sha256};

use crate::cache::MAX_COMPOSED_KEY_LENGTH;
use crate::error::{CacheError, Result};

// == Build Key ==
/// Builds a storage key of the form `category:identifier[:param=value...]`.
///
/// Params are sorted by name before concatenation, so identical parameter
/// maps produce the same key regardless of insertion order. Composed keys
/// longer than [`MAX_COMPOSED_KEY_LENGTH`] are replaced by
/// `category:<hex digest>` so backing-store key-length limits hold; the
/// digest is content-addressed (128 bits of SHA-256), not a cryptographic
/// commitment.
///
/// Empty `category` or `identifier` is a caller bug and returns
/// `InvalidRequest`.
pub fn build_key(category: &str, identifier: &str, params: &[(String, String)]) -> Result<String> {
    if category.is_empty() {
        return Err(CacheError::InvalidRequest(
            "Category cannot be empty".to_string(),
        ));
    }
    if identifier.is_empty() {
        return Err(CacheError::InvalidRequest(
            "Identifier cannot be empty".to_string(),
        ));
    }

    let mut key = format!("{}:{}", category, identifier);

    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, value) in sorted {
        key.push(':');
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }

    if key.len() > MAX_COMPOSED_KEY_LENGTH {
        key = format!("{}:{}", category, digest_128(&key));
    }

    Ok(key)
}

// == Digest ==
/// Returns the first 128 bits of the SHA-256 digest of `input` as hex.
fn digest_128(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_key_no_params() {
        let key = build_key("prediction", "modelA_SYM", &[]).unwrap();
        assert_eq!(key, "prediction:modelA_SYM");
    }

    #[test]
    fn test_build_key_with_params() {
        let key = build_key(
            "market_data",
            "AAPL",
            &params(&[("interval", "1d"), ("range", "1mo")]),
        )
        .unwrap();
        assert_eq!(key, "market_data:AAPL:interval=1d:range=1mo");
    }

    #[test]
    fn test_build_key_param_order_independent() {
        let k1 = build_key("prediction", "m1", &params(&[("a", "1"), ("b", "2")])).unwrap();
        let k2 = build_key("prediction", "m1", &params(&[("b", "2"), ("a", "1")])).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_build_key_long_key_hashed() {
        let long_id = "x".repeat(300);
        let key = build_key("backtest", &long_id, &[]).unwrap();

        assert!(key.len() <= MAX_COMPOSED_KEY_LENGTH);
        assert!(key.starts_with("backtest:"));
        // 128-bit digest = 32 hex chars
        let digest = key.strip_prefix("backtest:").unwrap();
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_build_key_long_key_deterministic() {
        let long_id = "y".repeat(300);
        let k1 = build_key("backtest", &long_id, &[]).unwrap();
        let k2 = build_key("backtest", &long_id, &[]).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_build_key_long_keys_distinct() {
        let k1 = build_key("backtest", &"a".repeat(300), &[]).unwrap();
        let k2 = build_key("backtest", &"b".repeat(300), &[]).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_build_key_empty_category() {
        let result = build_key("", "id", &[]);
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_build_key_empty_identifier() {
        let result = build_key("prediction", "", &[]);
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
