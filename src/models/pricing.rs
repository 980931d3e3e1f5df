//! Pricing request/response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One configured pricing source to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSource {
    #[serde(default)]
    pub source_name: Option<String>,
    /// Sources without a URL are skipped rather than rejected.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Request body for a pricing lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub item_key: Option<String>,
    #[serde(default)]
    pub location_zip: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Explicit ordered source list; falls back to configuration when absent.
    #[serde(default)]
    pub sources: Option<Vec<PricingSource>>,
}

/// Provenance for a resolved price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMeta {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
}

/// Outcome of a pricing lookup: a resolved price or a structured error.
///
/// Expected misses (no sources configured, no price detected) are data,
/// not exceptions; callers branch on the variant. The two shapes are never
/// both populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceResult {
    Price {
        item_key: String,
        unit_price: f64,
        unit: String,
        source_meta: SourceMeta,
    },
    Error {
        error: String,
    },
}

impl PriceResult {
    pub fn error(message: impl Into<String>) -> Self {
        PriceResult::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PriceResult::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_result_serializes_flat() {
        let result = PriceResult::Price {
            item_key: "drywall_patch".to_string(),
            unit_price: 3.5,
            unit: "sqft".to_string(),
            source_meta: SourceMeta {
                provider: "seed".to_string(),
                source_name: None,
                url: None,
                location_zip: None,
                scraped_at: None,
            },
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["item_key"], "drywall_patch");
        assert_eq!(value["unit_price"], 3.5);
        assert_eq!(value["source_meta"]["provider"], "seed");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_result_carries_only_error() {
        let result = PriceResult::error("No sources configured.");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({"error": "No sources configured."}));
    }

    #[test]
    fn test_request_tolerates_missing_fields() {
        let request: PriceRequest = serde_json::from_str("{}").unwrap();
        assert!(request.item_key.is_none());
        assert!(request.sources.is_none());
    }
}
