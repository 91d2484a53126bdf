//! Configuration structures for the extraction pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OrdexError, Result};

/// Main configuration for the ordex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for OrdexConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Field extraction configuration.
///
/// The phrase lists are product heuristics tuned against observed email
/// samples. They ship as data rather than control flow so they can be
/// unit-tested and extended through the config file without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Marker phrases that classify a message as not an order, grouped by
    /// notification category. Matched case-insensitively as substrings; any
    /// single hit rejects the message.
    pub denylist: BTreeMap<String, Vec<String>>,

    /// Metro names that terminate an address block. Multi-word names must
    /// precede their substrings ("New Delhi" before "Delhi").
    pub cities: Vec<String>,

    /// Item-name suffixes for the keyword fallback when no full
    /// quantity/name/price triple is found.
    pub food_keywords: Vec<String>,

    /// Currency symbol used when formatting amounts and item lines.
    pub currency_symbol: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let mut denylist = BTreeMap::new();
        denylist.insert(
            "security".to_string(),
            vec![
                "new login to your account".to_string(),
                "security alert".to_string(),
                "password was changed".to_string(),
                "login attempt".to_string(),
            ],
        );
        denylist.insert(
            "loyalty".to_string(),
            vec![
                "zomato gold".to_string(),
                "you've unlocked".to_string(),
                "pro membership".to_string(),
                "membership reward".to_string(),
            ],
        );
        denylist.insert(
            "marketing".to_string(),
            vec![
                "congratulations".to_string(),
                "exclusive offer".to_string(),
                "don't miss out".to_string(),
            ],
        );
        denylist.insert(
            "cancellation".to_string(),
            vec![
                "order has been cancelled".to_string(),
                "order was cancelled".to_string(),
                "cancellation confirmed".to_string(),
                "refund has been initiated".to_string(),
            ],
        );
        denylist.insert(
            "bill_payment".to_string(),
            vec![
                "bill payment successful".to_string(),
                "electricity bill".to_string(),
                "mobile recharge".to_string(),
            ],
        );

        Self {
            denylist,
            cities: [
                "Navi Mumbai",
                "Mumbai",
                "New Delhi",
                "Delhi",
                "Bengaluru",
                "Bangalore",
                "Hyderabad",
                "Chennai",
                "Kolkata",
                "Pune",
                "Gurgaon",
                "Gurugram",
                "Noida",
                "Ahmedabad",
                "Jaipur",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            food_keywords: [
                "cake", "pizza", "roll", "biryani", "kebab", "burger", "paratha", "naan", "dosa",
                "idli", "momos", "noodles", "thali", "sandwich", "wrap", "shake", "curry", "rice",
                "tikka", "samosa",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl OrdexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| OrdexError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| OrdexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_lists_populated() {
        let config = ExtractionConfig::default();
        assert!(config.denylist.contains_key("loyalty"));
        assert!(config.cities.iter().any(|c| c == "Mumbai"));
        assert!(config.food_keywords.iter().any(|k| k == "biryani"));
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = OrdexConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: OrdexConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.extraction.cities, config.extraction.cities);
        assert_eq!(back.extraction.denylist, config.extraction.denylist);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"extraction": {"currency_symbol": "Rs."}}"#;
        let config: OrdexConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extraction.currency_symbol, "Rs.");
        assert!(!config.extraction.cities.is_empty());
    }
}
