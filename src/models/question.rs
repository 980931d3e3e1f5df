//! Clarifying questions and recorded answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a question applies to the whole document or one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionScope {
    Global,
    Task,
}

/// Input widget expected for the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    Text,
    Number,
    Select,
}

/// Expected value in a dependency condition.
///
/// Serialized form is either a bare string or an array of acceptable
/// strings, so this is an untagged union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    Scalar(String),
    OneOf(Vec<String>),
}

/// A recorded answer value: free text, a number, or explicit null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(f64),
    Null,
}

impl AnswerValue {
    /// String representation used for dependency comparison.
    ///
    /// Integral numbers render without a fractional part so numeric and
    /// string encodings of the same answer interoperate (`3` == "3").
    pub fn coerce(&self) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            AnswerValue::Null => "null".to_string(),
        }
    }
}

/// A clarifying question surfaced to the estimator.
///
/// Visibility is recomputed from `depends_on` against current answers on
/// every evaluation, never cached across answer changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_key: String,
    pub scope: QuestionScope,
    pub prompt: String,
    pub answer_type: AnswerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
    /// Every condition must hold for the question to be visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<BTreeMap<String, Expected>>,
    /// Line item field this answer feeds back into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_field: Option<String>,
}
