//! Trade rule tables.

use serde::Deserialize;

use crate::models::TradeRule;

/// Immutable table of trade rules, loaded once at startup and passed
/// explicitly into extraction.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<TradeRule>,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<TradeRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<TradeRule>) -> Self {
        RuleSet { rules }
    }

    /// Rules in declaration order; extraction output follows this order.
    pub fn rules(&self) -> &[TradeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse a rule table from a TOML document with `[[rules]]` entries.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        let file: RuleFile = toml::from_str(raw)?;
        Ok(RuleSet::new(file.rules))
    }

    /// The built-in trade rule table.
    pub fn builtin() -> Self {
        let rule = |task_key: &str,
                    trade: &str,
                    action: &str,
                    object: &str,
                    keywords: &[&str],
                    missing_fields: &[&str]| TradeRule {
            task_key: task_key.to_string(),
            trade: trade.to_string(),
            action: action.to_string(),
            object: object.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            missing_fields: missing_fields.iter().map(|s| s.to_string()).collect(),
        };

        RuleSet::new(vec![
            rule(
                "water_extract",
                "water_mitigation",
                "Extract water",
                "affected area",
                &["water damage", "wet", "flood", "leak", "standing water"],
                &["quantity", "unit", "access"],
            ),
            rule(
                "mold_treat",
                "mold_remediation",
                "Treat mold",
                "affected surfaces",
                &["mold", "fungal", "mildew"],
                &["quantity", "unit", "containment"],
            ),
            rule(
                "smoke_clean",
                "fire_restoration",
                "Clean smoke residue",
                "interior surfaces",
                &["smoke", "soot", "fire damage"],
                &["quantity", "unit", "finish"],
            ),
            rule(
                "drywall_patch",
                "carpentry",
                "Patch drywall",
                "damaged walls",
                &["drywall", "gypsum", "wallboard"],
                &["quantity", "unit", "finish"],
            ),
            rule(
                "flooring_remove",
                "carpentry",
                "Remove flooring",
                "damaged flooring",
                &["flooring", "carpet", "vinyl", "laminate"],
                &["quantity", "unit", "access"],
            ),
            rule(
                "inspection_repair",
                "general",
                "Complete inspection repairs",
                "listed items",
                &["inspection", "report item", "defect", "repair list"],
                &["quantity", "unit", "location"],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules() {
        let rules = RuleSet::builtin();
        assert_eq!(rules.len(), 6);
        assert_eq!(rules.rules()[0].task_key, "water_extract");
        assert_eq!(rules.rules()[5].trade, "general");
    }

    #[test]
    fn test_from_toml_str() {
        let raw = r#"
            [[rules]]
            task_key = "roof_patch"
            trade = "roofing"
            action = "Patch roof"
            object = "damaged shingles"
            keywords = ["shingle", "roof leak"]
            missing_fields = ["quantity"]
        "#;
        let rules = RuleSet::from_toml_str(raw).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.rules()[0].keywords, vec!["shingle", "roof leak"]);
    }

    #[test]
    fn test_from_toml_str_rejects_bad_shape() {
        assert!(RuleSet::from_toml_str("rules = 3").is_err());
    }
}
