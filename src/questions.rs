//! Clarifying question templates and dependency-based visibility.

use std::collections::HashMap;

use crate::models::{AnswerType, AnswerValue, Expected, Question, QuestionScope};

/// Whether a question currently applies given recorded answers.
///
/// No `depends_on` means always visible. Otherwise every dependency must
/// hold: the referenced answer's string form must equal the expected
/// scalar, or be a member of the expected list. A missing answer fails its
/// condition, so partially answered dependencies keep the question hidden.
/// Visibility is recomputed on every call rather than cached.
pub fn is_visible(question: &Question, answers: &HashMap<String, AnswerValue>) -> bool {
    let Some(depends_on) = &question.depends_on else {
        return true;
    };

    depends_on.iter().all(|(key, expected)| {
        let Some(answer) = answers.get(key) else {
            return false;
        };
        let value = answer.coerce();
        match expected {
            Expected::Scalar(scalar) => value == *scalar,
            Expected::OneOf(options) => options.iter().any(|option| *option == value),
        }
    })
}

fn template(
    scope: QuestionScope,
    key: &str,
    prompt: &str,
    answer_type: AnswerType,
    options: &[&str],
    required: bool,
    derived_field: &str,
) -> Question {
    Question {
        question_key: key.to_string(),
        scope,
        prompt: prompt.to_string(),
        answer_type,
        options: if options.is_empty() {
            None
        } else {
            Some(options.iter().map(|s| s.to_string()).collect())
        },
        required,
        depends_on: None,
        derived_field: Some(derived_field.to_string()),
    }
}

/// Document-global questions asked for every estimate.
pub fn global_questions() -> Vec<Question> {
    use AnswerType::{Select, Text};
    use QuestionScope::Global;

    vec![
        template(
            Global,
            "location_zip",
            "Confirm the project ZIP code for pricing",
            Text,
            &[],
            true,
            "location_zip",
        ),
        template(
            Global,
            "access",
            "Access conditions for the work area",
            Select,
            &["standard", "limited", "difficult"],
            true,
            "access",
        ),
        template(
            Global,
            "occupancy",
            "Is the space occupied during work?",
            Select,
            &["occupied", "vacant"],
            true,
            "occupancy",
        ),
    ]
}

/// Task-scoped question template for one missing field, if one exists.
pub fn field_question(field: &str) -> Option<Question> {
    use AnswerType::{Number, Select, Text};
    use QuestionScope::Task;

    match field {
        "quantity" => Some(template(
            Task,
            "quantity",
            "Estimated quantity for this task",
            Number,
            &[],
            true,
            "quantity",
        )),
        "unit" => Some(template(
            Task,
            "unit",
            "Unit of measure",
            Select,
            &["sqft", "lf", "ea"],
            true,
            "unit",
        )),
        "location" => Some(template(
            Task,
            "location",
            "Room or area name",
            Text,
            &[],
            true,
            "location_label",
        )),
        "finish" => Some(template(
            Task,
            "finish",
            "Finish level",
            Select,
            &["basic", "standard", "premium"],
            false,
            "finish",
        )),
        "containment" => Some(template(
            Task,
            "containment",
            "Containment level needed",
            Select,
            &["none", "partial", "full"],
            false,
            "containment",
        )),
        _ => None,
    }
}

/// Questions for a task's missing fields: deduplicated, first-seen order,
/// unknown fields skipped.
pub fn build_questions(missing_fields: &[String]) -> Vec<Question> {
    let mut seen: Vec<&str> = Vec::new();
    missing_fields
        .iter()
        .filter_map(|field| {
            if seen.contains(&field.as_str()) {
                return None;
            }
            seen.push(field.as_str());
            field_question(field)
        })
        .collect()
}
