//! Category Policy Module
//!
//! Static registry mapping a cached-data category to its TTL and
//! serialization mode. The table is compiled in and read-only at runtime.

// == Category ==
/// Known classes of cached data, each with its own TTL/compression policy.
///
/// Categories are a closed enumeration; names that don't match a known
/// variant fall back to [`CategoryPolicy::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Model prediction signals
    Prediction,
    /// Market data snapshots (quotes, OHLCV)
    MarketData,
    /// Backtest result sets
    Backtest,
    /// Portfolio valuations
    Portfolio,
    /// News and sentiment digests
    News,
}

impl Category {
    // == Parse ==
    /// Parses a category name; unknown names return None.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "prediction" => Some(Self::Prediction),
            "market_data" => Some(Self::MarketData),
            "backtest" => Some(Self::Backtest),
            "portfolio" => Some(Self::Portfolio),
            "news" => Some(Self::News),
            _ => None,
        }
    }

    // == Policy ==
    /// Returns the policy for this category.
    pub fn policy(&self) -> CategoryPolicy {
        match self {
            Self::Prediction => CategoryPolicy {
                ttl_seconds: 600,
                compress: true,
            },
            Self::MarketData => CategoryPolicy {
                ttl_seconds: 60,
                compress: false,
            },
            Self::Backtest => CategoryPolicy {
                ttl_seconds: 3600,
                compress: true,
            },
            Self::Portfolio => CategoryPolicy {
                ttl_seconds: 300,
                compress: false,
            },
            Self::News => CategoryPolicy {
                ttl_seconds: 1800,
                compress: false,
            },
        }
    }
}

// == Category Policy ==
/// TTL and serialization mode applied to one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPolicy {
    /// Time-to-live in seconds
    pub ttl_seconds: u64,
    /// Whether payloads use the compact binary encoding
    pub compress: bool,
}

impl CategoryPolicy {
    /// Policy applied to categories without a dedicated entry.
    pub const DEFAULT: CategoryPolicy = CategoryPolicy {
        ttl_seconds: 300,
        compress: false,
    };

    // == Lookup ==
    /// Resolves the policy for a category name, defaulting for unknown names.
    pub fn lookup(name: &str) -> CategoryPolicy {
        Category::parse(name)
            .map(|c| c.policy())
            .unwrap_or(Self::DEFAULT)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!(Category::parse("prediction"), Some(Category::Prediction));
        assert_eq!(Category::parse("market_data"), Some(Category::MarketData));
        assert_eq!(Category::parse("backtest"), Some(Category::Backtest));
        assert_eq!(Category::parse("portfolio"), Some(Category::Portfolio));
        assert_eq!(Category::parse("news"), Some(Category::News));
    }

    #[test]
    fn test_parse_unknown_category() {
        assert_eq!(Category::parse("kyc_documents"), None);
    }

    #[test]
    fn test_prediction_policy() {
        let policy = CategoryPolicy::lookup("prediction");
        assert_eq!(policy.ttl_seconds, 600);
        assert!(policy.compress);
    }

    #[test]
    fn test_market_data_policy() {
        let policy = CategoryPolicy::lookup("market_data");
        assert_eq!(policy.ttl_seconds, 60);
        assert!(!policy.compress);
    }

    #[test]
    fn test_unknown_category_gets_default() {
        let policy = CategoryPolicy::lookup("something_new");
        assert_eq!(policy, CategoryPolicy::DEFAULT);
        assert_eq!(policy.ttl_seconds, 300);
        assert!(!policy.compress);
    }
}
