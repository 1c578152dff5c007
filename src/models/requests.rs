//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Request body for the SET operation (PUT /cache)
///
/// # Fields
/// - `category`: named class of cached data (e.g. "prediction")
/// - `identifier`: logical identifier within the category
/// - `value`: the value to cache (any JSON value)
/// - `ttl`: optional TTL override in seconds (category policy otherwise)
/// - `params`: optional string parameters folded into the cache key
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cached-data category
    pub category: String,
    /// Identifier within the category
    pub identifier: String,
    /// The value to cache
    pub value: Value,
    /// Optional TTL override in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Optional key parameters
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.category.is_empty() {
            return Some("Category cannot be empty".to_string());
        }
        if self.identifier.is_empty() {
            return Some("Identifier cannot be empty".to_string());
        }
        None
    }

    /// Key parameters as the pair slice the cache service expects.
    pub fn param_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"category":"prediction","identifier":"modelA_SYM","value":{"signal":"BUY"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.category, "prediction");
        assert_eq!(req.identifier, "modelA_SYM");
        assert!(req.ttl.is_none());
        assert!(req.params.is_empty());
    }

    #[test]
    fn test_set_request_with_ttl_and_params() {
        let json = r#"{"category":"market_data","identifier":"AAPL","value":42,"ttl":60,"params":{"interval":"1d"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(60));
        assert_eq!(req.params.get("interval").map(String::as_str), Some("1d"));
    }

    #[test]
    fn test_validate_empty_category() {
        let req = SetRequest {
            category: "".to_string(),
            identifier: "id".to_string(),
            value: serde_json::json!(null),
            ttl: None,
            params: BTreeMap::new(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            category: "prediction".to_string(),
            identifier: "modelA_SYM".to_string(),
            value: serde_json::json!({"signal": "BUY"}),
            ttl: Some(600),
            params: BTreeMap::new(),
        };
        assert!(req.validate().is_none());
    }
}
