//! Trade rules and the tasks extracted from matching them.

use serde::{Deserialize, Serialize};

/// A static extraction rule for one kind of repair task.
///
/// Loaded once at startup and never mutated; the extraction engine takes
/// the rule table as an explicit argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRule {
    /// Stable identifier for this repair action within its trade.
    pub task_key: String,
    pub trade: String,
    pub action: String,
    pub object: String,
    /// Trigger keywords, in declaration order. The first keyword anchors
    /// the citation.
    pub keywords: Vec<String>,
    /// Field names expected to be missing and requiring clarification.
    #[serde(default)]
    pub missing_fields: Vec<String>,
}

/// Citation back to the document text that triggered an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// 1-based page number the match landed on.
    pub page: u32,
    /// Bounded text window around the match, whitespace-trimmed.
    pub excerpt: String,
    /// Window bounds in the full text (pre-trim).
    pub start: usize,
    pub end: usize,
}

/// One candidate repair task produced by a firing trade rule.
///
/// Created once per extraction pass; superseded by a new run on re-upload,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub task_key: String,
    pub trade: String,
    pub action: String,
    pub object: String,
    pub keywords: Vec<String>,
    pub missing_fields: Vec<String>,
    /// Keyword-hit confidence in [0, 0.95].
    pub confidence: f64,
    /// None is a valid "citation unavailable" state.
    pub source_ref: Option<SourceRef>,
}
