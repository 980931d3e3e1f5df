//! Seed rate card: stored unit prices for common item keys.

use crate::models::{PriceResult, SourceMeta};

/// Seeded unit prices by item key: (unit, price).
const SEED_PRICES: &[(&str, &str, f64)] = &[
    ("drywall_patch", "sqft", 3.5),
    ("flooring_remove", "sqft", 2.1),
    ("water_extract", "sqft", 1.8),
    ("mold_treat", "sqft", 4.2),
    ("smoke_clean", "sqft", 3.9),
];

/// Look up an item key in the seed rate card.
pub fn seed_price(item_key: &str) -> Option<PriceResult> {
    let (_, unit, price) = SEED_PRICES.iter().find(|(key, _, _)| *key == item_key)?;
    Some(PriceResult::Price {
        item_key: item_key.to_string(),
        unit_price: *price,
        unit: unit.to_string(),
        source_meta: SourceMeta {
            provider: "seed".to_string(),
            source_name: None,
            url: None,
            location_zip: None,
            scraped_at: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_price_hit() {
        let result = seed_price("mold_treat").unwrap();
        match result {
            PriceResult::Price {
                unit_price,
                unit,
                source_meta,
                ..
            } => {
                assert_eq!(unit_price, 4.2);
                assert_eq!(unit, "sqft");
                assert_eq!(source_meta.provider, "seed");
            }
            PriceResult::Error { .. } => panic!("expected a price"),
        }
    }

    #[test]
    fn test_seed_price_miss() {
        assert!(seed_price("chimney_rebuild").is_none());
    }
}
