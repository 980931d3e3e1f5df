//! Price extraction from scraped product pages.
//!
//! Structured data first: every `<script type="application/ld+json">`
//! block is parsed (individually, so one bad block cannot abort the page)
//! and searched for offer prices. Meta tags are a fallback only when no
//! JSON-LD offer yields a price.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Extract a positive unit price from page HTML, JSON-LD before meta tags.
pub fn extract_price(html: &str) -> Option<f64> {
    let document = Html::parse_document(html);
    price_from_json_ld(&parse_json_ld_blocks(&document))
        .or_else(|| price_from_meta(&document).filter(|price| *price > 0.0))
}

/// Parse all JSON-LD script blocks, flattening top-level arrays.
fn parse_json_ld_blocks(document: &Html) -> Vec<Value> {
    let selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector");

    let mut entries = Vec::new();
    for script in document.select(&selector) {
        let text: String = script.text().collect();
        if text.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(values)) => entries.extend(values),
            Ok(value) => entries.push(value),
            Err(error) => {
                debug!(%error, "skipping malformed JSON-LD block");
            }
        }
    }
    entries
}

/// First positive offer price across the parsed entries.
///
/// An entry's `offers` may be a single offer or a list; within an offer,
/// `price` takes priority over `lowPrice` over `highPrice`.
fn price_from_json_ld(entries: &[Value]) -> Option<f64> {
    for entry in entries {
        let Some(offers) = entry.get("offers") else {
            continue;
        };
        let offer_list: Vec<&Value> = match offers {
            Value::Array(list) => list.iter().collect(),
            other => vec![other],
        };
        for offer in offer_list {
            for key in ["price", "lowPrice", "highPrice"] {
                if let Some(price) = offer.get(key).and_then(numeric_value) {
                    if price > 0.0 {
                        return Some(price);
                    }
                }
            }
        }
    }
    None
}

/// Price from `product:price:amount` or `twitter:data1` meta content,
/// with everything but digits and decimal points stripped.
fn price_from_meta(document: &Html) -> Option<f64> {
    let selectors = [
        r#"meta[property="product:price:amount"]"#,
        r#"meta[name="twitter:data1"]"#,
    ];

    for raw in selectors {
        let selector = Selector::parse(raw).expect("static selector");
        let content = document
            .select(&selector)
            .filter_map(|element| element.value().attr("content"))
            .find(|content| !content.is_empty());
        if let Some(content) = content {
            let digits: String = content
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if let Ok(price) = digits.parse::<f64>() {
                return Some(price);
            }
        }
    }
    None
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ld_offer_price() {
        let html = r#"<html><head>
            <script type="application/ld+json">
                {"@type": "Product", "offers": {"price": 150}}
            </script>
        </head><body></body></html>"#;
        assert_eq!(extract_price(html), Some(150.0));
    }

    #[test]
    fn test_json_ld_string_price_and_offer_list() {
        let html = r#"<html><head>
            <script type="application/ld+json">
                {"offers": [{"availability": "InStock"}, {"price": "42.50"}]}
            </script>
        </head></html>"#;
        assert_eq!(extract_price(html), Some(42.5));
    }

    #[test]
    fn test_json_ld_low_price_fallback() {
        let html = r#"<script type="application/ld+json">
            {"offers": {"lowPrice": 12.25, "highPrice": 30}}
        </script>"#;
        assert_eq!(extract_price(html), Some(12.25));
    }

    #[test]
    fn test_json_ld_array_flattened() {
        let html = r#"<script type="application/ld+json">
            [{"@type": "Organization"}, {"offers": {"highPrice": 99}}]
        </script>"#;
        assert_eq!(extract_price(html), Some(99.0));
    }

    #[test]
    fn test_malformed_block_skipped() {
        let html = r#"
            <script type="application/ld+json">{not valid json</script>
            <script type="application/ld+json">{"offers": {"price": 7.5}}</script>
        "#;
        assert_eq!(extract_price(html), Some(7.5));
    }

    #[test]
    fn test_json_ld_wins_over_meta() {
        let html = r#"<html><head>
            <meta property="product:price:amount" content="999.99">
            <script type="application/ld+json">{"offers": {"price": 150}}</script>
        </head></html>"#;
        assert_eq!(extract_price(html), Some(150.0));
    }

    #[test]
    fn test_meta_price_amount() {
        let html = r#"<meta property="product:price:amount" content="$1,234.50 USD">"#;
        assert_eq!(extract_price(html), Some(1234.5));
    }

    #[test]
    fn test_meta_twitter_data_fallback() {
        let html = r#"<meta name="twitter:data1" content="Price: $89.00">"#;
        assert_eq!(extract_price(html), Some(89.0));
    }

    #[test]
    fn test_non_positive_prices_rejected() {
        let html = r#"<script type="application/ld+json">{"offers": {"price": 0}}</script>"#;
        assert_eq!(extract_price(html), None);

        let html = r#"<meta property="product:price:amount" content="0">"#;
        assert_eq!(extract_price(html), None);
    }

    #[test]
    fn test_no_price_anywhere() {
        let html = "<html><body><p>Call for pricing</p></body></html>";
        assert_eq!(extract_price(html), None);
    }
}
