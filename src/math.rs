//! Labor and cost math.
//!
//! Pure, deterministic functions: no I/O, table-driven modifier factors,
//! rounding only at each function's output so composed calculations stay
//! reproducible and each step is testable on its own.

use serde::{Deserialize, Serialize};

/// Situational labor-rate modifiers. Absent dimensions leave the rate
/// untouched; unknown values multiply by 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborModifiers {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default)]
    pub occupancy: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub protection: Option<String>,
}

impl LaborModifiers {
    fn dimensions(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("access", self.access.as_deref()),
            ("finish", self.finish.as_deref()),
            ("occupancy", self.occupancy.as_deref()),
            ("height", self.height.as_deref()),
            ("protection", self.protection.as_deref()),
        ]
    }
}

/// Per-dimension, per-value rate factors.
fn modifier_factor(dimension: &str, value: &str) -> f64 {
    match (dimension, value) {
        ("access", "standard") => 1.0,
        ("access", "limited") => 1.15,
        ("access", "difficult") => 1.3,
        ("finish", "basic") => 0.9,
        ("finish", "standard") => 1.0,
        ("finish", "premium") => 1.2,
        ("occupancy", "occupied") => 1.15,
        ("occupancy", "vacant") => 1.0,
        ("height", "ground") => 1.0,
        ("height", "ladder") => 1.1,
        ("height", "scaffold") => 1.25,
        ("protection", "none") => 1.0,
        ("protection", "light") => 1.05,
        ("protection", "heavy") => 1.15,
        _ => 1.0,
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Apply every present modifier to a base production rate.
///
/// Factors compose multiplicatively, so dimension order cannot change the
/// result.
pub fn apply_modifiers(base_rate: f64, modifiers: &LaborModifiers) -> f64 {
    modifiers
        .dimensions()
        .iter()
        .fold(base_rate, |rate, (dimension, value)| match value {
            Some(value) => rate * modifier_factor(dimension, value),
            None => rate,
        })
}

/// Labor hours for a quantity at a modified production rate (units/hour).
///
/// A non-positive adjusted rate yields 0 hours rather than dividing by it.
pub fn calculate_labor_hours(quantity: f64, base_rate: f64, modifiers: &LaborModifiers) -> f64 {
    let adjusted_rate = apply_modifiers(base_rate, modifiers);
    if adjusted_rate <= 0.0 {
        return 0.0;
    }
    round2(quantity / adjusted_rate)
}

/// Material cost for a quantity at a unit price.
pub fn calculate_material_cost(quantity: f64, unit_price: f64) -> f64 {
    round2(quantity * unit_price)
}

/// Cost components feeding a line item total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostComponents {
    pub material_cost: f64,
    pub labor_cost: f64,
    pub equipment_cost: f64,
    pub disposal_cost: f64,
    pub markup_pct: f64,
}

/// Line item total: component subtotal plus percentage markup.
pub fn calculate_line_item_total(components: &CostComponents) -> f64 {
    let subtotal = components.material_cost
        + components.labor_cost
        + components.equipment_cost
        + components.disposal_cost;
    let markup = subtotal * (components.markup_pct / 100.0);
    round2(subtotal + markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifiers(access: Option<&str>, finish: Option<&str>, occupancy: Option<&str>) -> LaborModifiers {
        LaborModifiers {
            access: access.map(String::from),
            finish: finish.map(String::from),
            occupancy: occupancy.map(String::from),
            ..LaborModifiers::default()
        }
    }

    #[test]
    fn test_apply_modifiers_compounds() {
        let adjusted = apply_modifiers(
            10.0,
            &modifiers(Some("limited"), Some("premium"), Some("occupied")),
        );
        // 10 * 1.15 * 1.2 * 1.15
        assert!((adjusted - 15.87).abs() < 1e-9);
        assert!(adjusted > 10.0);
    }

    #[test]
    fn test_apply_modifiers_unknown_value_is_neutral() {
        let adjusted = apply_modifiers(10.0, &modifiers(Some("helicopter"), None, None));
        assert_eq!(adjusted, 10.0);
    }

    #[test]
    fn test_labor_hours_from_production_rate() {
        let hours = calculate_labor_hours(
            100.0,
            20.0,
            &modifiers(Some("standard"), None, Some("vacant")),
        );
        assert_eq!(hours, 5.0);
    }

    #[test]
    fn test_labor_hours_rounds_at_output() {
        let hours = calculate_labor_hours(
            4.0,
            2.0,
            &modifiers(Some("limited"), Some("standard"), None),
        );
        // 4 / (2 * 1.15 * 1.0) = 1.7391...
        assert_eq!(hours, 1.74);
    }

    #[test]
    fn test_labor_hours_guards_non_positive_rate() {
        assert_eq!(calculate_labor_hours(100.0, 0.0, &LaborModifiers::default()), 0.0);
        assert_eq!(calculate_labor_hours(100.0, -5.0, &LaborModifiers::default()), 0.0);
    }

    #[test]
    fn test_material_cost() {
        assert_eq!(calculate_material_cost(10.0, 2.5), 25.0);
        assert_eq!(calculate_material_cost(3.0, 3.333), 10.0);
    }

    #[test]
    fn test_line_item_total_with_markup() {
        let total = calculate_line_item_total(&CostComponents {
            material_cost: 100.0,
            labor_cost: 50.0,
            equipment_cost: 20.0,
            disposal_cost: 10.0,
            markup_pct: 10.0,
        });
        assert_eq!(total, 198.0);
    }

    #[test]
    fn test_line_item_total_defaults() {
        let total = calculate_line_item_total(&CostComponents {
            material_cost: 100.0,
            labor_cost: 50.0,
            ..CostComponents::default()
        });
        assert_eq!(total, 150.0);
    }
}
