//! Keyword rule engine mapping parsed document text to candidate tasks.

pub mod citation;
mod rules;

pub use rules::RuleSet;

use crate::models::{ExtractedTask, PageMapEntry, TradeRule};

/// Keyword whose first occurrence anchors a rule's citation.
///
/// Kept as the FIRST declared keyword, not necessarily the one that
/// matched. The excerpt can therefore cite a keyword that never appeared
/// when a later keyword fired instead; changing this is a behavior change,
/// which is why the choice lives in one place.
fn citation_keyword(rule: &TradeRule) -> Option<&str> {
    rule.keywords.first().map(String::as_str)
}

/// Confidence from the number of distinct keywords found.
///
/// One weak signal yields 0.60; the 0.95 ceiling keeps substring matching
/// from ever claiming certainty.
fn score_confidence(hits: usize) -> f64 {
    (0.45 + 0.15 * hits as f64).min(0.95)
}

/// Run every trade rule against the document text.
///
/// A rule fires when any of its keywords appears as a case-insensitive
/// substring; the hit count is the number of distinct keywords present,
/// not occurrences. Each firing rule contributes exactly one task, rules
/// never suppress each other, and output order equals rule declaration
/// order. Zero matches produce an empty list; this never errors.
pub fn extract_tasks(
    document_text: &str,
    page_map: &[PageMapEntry],
    rules: &RuleSet,
) -> Vec<ExtractedTask> {
    let normalized = document_text.to_ascii_lowercase();

    rules
        .rules()
        .iter()
        .filter_map(|rule| {
            let hits = rule
                .keywords
                .iter()
                .filter(|keyword| normalized.contains(&keyword.to_ascii_lowercase()))
                .count();
            if hits == 0 {
                return None;
            }

            let source_ref = citation_keyword(rule)
                .and_then(|keyword| citation::locate(document_text, page_map, keyword));

            Some(ExtractedTask {
                task_key: rule.task_key.clone(),
                trade: rule.trade.clone(),
                action: rule.action.clone(),
                object: rule.object.clone(),
                keywords: rule.keywords.clone(),
                missing_fields: rule.missing_fields.clone(),
                confidence: score_confidence(hits),
                source_ref,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParseResult;

    fn full_page(text: &str) -> Vec<PageMapEntry> {
        vec![PageMapEntry {
            page: 1,
            start: 0,
            end: text.len(),
        }]
    }

    #[test]
    fn test_no_matches_yields_empty_list() {
        let rules = RuleSet::builtin();
        let tasks = extract_tasks("quarterly revenue summary", &[], &rules);
        assert!(tasks.is_empty());

        let tasks = extract_tasks("", &[], &rules);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_single_hit_confidence() {
        let rules = RuleSet::builtin();
        // One distinct keyword ("wet") yields exactly 0.60.
        let text = "the subfloor is wet";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_key, "water_extract");
        assert!((tasks[0].confidence - 0.60).abs() < 1e-9);

        // Two distinct keywords step it to 0.75.
        let text = "standing water observed under the sink was wet";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        assert!((tasks[0].confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_saturates_below_certainty() {
        let rules = RuleSet::builtin();
        let text = "water damage, wet carpet, flood line, active leak, standing water";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        let water = tasks
            .iter()
            .find(|t| t.task_key == "water_extract")
            .unwrap();
        // 5 distinct keyword hits: 0.45 + 0.75 caps at 0.95.
        assert!((water.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_hit_count_ignores_repeat_occurrences() {
        let rules = RuleSet::builtin();
        let text = "wet wet wet wet wet";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        assert_eq!(tasks.len(), 1);
        assert!((tasks[0].confidence - 0.60).abs() < 1e-9);
    }

    #[test]
    fn test_output_follows_rule_declaration_order() {
        let rules = RuleSet::builtin();
        // Mention carpentry first in the text; water rule still comes first.
        let text = "drywall crumbling where the flood left wet insulation";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        let keys: Vec<&str> = tasks.iter().map(|t| t.task_key.as_str()).collect();
        assert_eq!(keys, vec!["water_extract", "drywall_patch"]);
    }

    #[test]
    fn test_multiple_trades_fire_together() {
        let rules = RuleSet::builtin();
        let text = "standing water and visible mold behind the drywall";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        let keys: Vec<&str> = tasks.iter().map(|t| t.task_key.as_str()).collect();
        assert_eq!(keys, vec!["water_extract", "mold_treat", "drywall_patch"]);
    }

    #[test]
    fn test_matching_is_substring_based() {
        // "mold" inside "moldings" still fires: substring semantics are
        // part of the contract, not a bug.
        let rules = RuleSet::builtin();
        let text = "crown moldings need repainting";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_key, "mold_treat");
    }

    #[test]
    fn test_citation_uses_first_declared_keyword() {
        let rules = RuleSet::builtin();
        // "mildew" fires the mold rule, but the citation is keyed off the
        // rule's first keyword ("mold"), which never appears here: the task
        // fires without a citation.
        let text = "heavy mildew on the window sill";
        let tasks = extract_tasks(text, &full_page(text), &rules);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_key, "mold_treat");
        assert!(tasks[0].source_ref.is_none());
    }

    #[test]
    fn test_citation_resolves_page() {
        let rules = RuleSet::builtin();
        let parsed = ParseResult::from_pages(vec![
            "roof section clean".to_string(),
            "water damage near water heater".to_string(),
        ]);
        let tasks = extract_tasks(&parsed.parsed_text, &parsed.page_map, &rules);
        let water = tasks
            .iter()
            .find(|t| t.task_key == "water_extract")
            .unwrap();
        let source_ref = water.source_ref.as_ref().unwrap();
        assert_eq!(source_ref.page, 2);
        assert!(source_ref.excerpt.contains("water damage"));
    }
}
