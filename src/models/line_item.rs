//! Priced line items.

use serde::{Deserialize, Serialize};

use crate::math::{self, CostComponents};

use super::{ExtractedTask, SourceRef};

/// Default markup applied to freshly extracted line items.
const DEFAULT_MARKUP_PCT: f64 = 15.0;

/// One quantified, priced unit of work in an estimate.
///
/// The total is never stored: it is recomputed on demand from the cost
/// components and markup so the components stay the single source of truth.
/// Quantity and pricing fields stay `None` until clarifying answers and
/// pricing lookups fill them in; an unpriced item still renders, just with
/// empty price fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_key: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub material_unit_price: Option<f64>,
    pub labor_hours: Option<f64>,
    pub labor_rate: Option<f64>,
    #[serde(default)]
    pub equipment_cost: f64,
    #[serde(default)]
    pub disposal_cost: f64,
    #[serde(default)]
    pub markup_pct: f64,
    pub source_ref: Option<SourceRef>,
}

impl LineItem {
    /// Seed an unpriced line item from an extracted task.
    pub fn from_task(task: &ExtractedTask) -> Self {
        LineItem {
            item_key: Some(task.task_key.clone()),
            description: Some(format!("{} for {}.", task.action, task.object)),
            quantity: None,
            unit: None,
            material_unit_price: None,
            labor_hours: None,
            labor_rate: None,
            equipment_cost: 0.0,
            disposal_cost: 0.0,
            markup_pct: DEFAULT_MARKUP_PCT,
            source_ref: task.source_ref.clone(),
        }
    }

    /// Material cost, or None while quantity or unit price is unresolved.
    pub fn material_cost(&self) -> Option<f64> {
        Some(math::calculate_material_cost(
            self.quantity?,
            self.material_unit_price?,
        ))
    }

    /// Labor cost, or None while hours or rate is unresolved.
    pub fn labor_cost(&self) -> Option<f64> {
        Some(math::round2(self.labor_hours? * self.labor_rate?))
    }

    /// Recompute the line item total from its components.
    ///
    /// None until both material and labor costs are resolvable.
    pub fn total(&self) -> Option<f64> {
        let components = CostComponents {
            material_cost: self.material_cost()?,
            labor_cost: self.labor_cost()?,
            equipment_cost: self.equipment_cost,
            disposal_cost: self.disposal_cost,
            markup_pct: self.markup_pct,
        };
        Some(math::calculate_line_item_total(&components))
    }
}
