//! Recovery of quiz documents from raw generator output.
//!
//! Model output often arrives wrapped in markdown fences or surrounded by
//! prose. The text is cleaned and handed to an ordered chain of parse
//! strategies where the first success wins. Structural validation runs on
//! the parsed value afterwards.

use serde_json::{Map, Value};

use crate::error::{MalformedGenerationError, MalformedReason};
use crate::model::{
    default_difficulty_tag, default_points, GenerationRequest, QuestionKind, QuestionSpec,
    QuestionType, QuizDocument,
};

/// A single way of turning cleaned text into JSON.
type ParseStrategy = fn(&str) -> serde_json::Result<Value>;

/// Strategies in decreasing order of strictness.
const PARSE_STRATEGIES: &[(&str, ParseStrategy)] = &[
    ("strict", parse_strict),
    ("line-recovery", parse_line_recovery),
];

/// Remove markdown code fence markers, keeping the fenced content.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Slice from the first `{` to the last `}` if they form a span; otherwise
/// return the trimmed text.
pub fn isolate_json_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text.trim(),
    }
}

fn parse_strict(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(text)
}

/// Accumulate lines from the first one opening with `{` up to and including
/// the first one closing with `}`, then parse that block.
fn parse_line_recovery(text: &str) -> serde_json::Result<Value> {
    let mut block = Vec::new();
    let mut in_json = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('{') {
            in_json = true;
        }
        if in_json {
            block.push(line);
            if trimmed.ends_with('}') {
                break;
            }
        }
    }

    serde_json::from_str(&block.join("\n"))
}

/// Clean raw generator output and parse it with the strategy chain.
///
/// Returns the first successfully parsed value. On failure the reason carries
/// the error from the last strategy tried.
pub fn parse_generated_json(raw: &str) -> Result<Value, MalformedReason> {
    let cleaned = strip_code_fences(raw);
    let candidate = isolate_json_span(&cleaned);

    let mut last_error = String::from("empty response");
    for (name, strategy) in PARSE_STRATEGIES {
        match strategy(candidate) {
            Ok(value) => {
                tracing::debug!("parse strategy '{name}' succeeded");
                return Ok(value);
            }
            Err(e) => {
                tracing::debug!("parse strategy '{name}' failed: {e}");
                last_error = e.to_string();
            }
        }
    }

    Err(MalformedReason::Unparseable(last_error))
}

/// Recover a validated [`QuizDocument`] from raw generator output.
///
/// The request is only used for diagnostics; it never changes what is
/// accepted.
pub fn extract_quiz(
    raw: &str,
    request: &GenerationRequest,
) -> Result<QuizDocument, MalformedGenerationError> {
    let document = extract_document(raw).inspect_err(|e| {
        tracing::warn!(
            "generated quiz for topic '{}' rejected: {}",
            request.topic,
            e.reason
        );
    })?;

    let requested = request.question_count.get() as usize;
    if document.questions.len() != requested {
        tracing::info!(
            "generator returned {} questions, {} requested",
            document.questions.len(),
            requested
        );
    }

    Ok(document)
}

/// Recover a validated [`QuizDocument`] without request context.
pub fn extract_document(raw: &str) -> Result<QuizDocument, MalformedGenerationError> {
    parse_generated_json(raw)
        .and_then(validate_document)
        .map_err(|reason| MalformedGenerationError::new(reason, raw))
}

/// Validate a parsed value and convert it into a quiz document.
pub fn validate_document(value: Value) -> Result<QuizDocument, MalformedReason> {
    let Value::Object(root) = value else {
        return Err(MalformedReason::NotAnObject);
    };

    let title = match field(&root, "title") {
        None => return Err(MalformedReason::MissingField("title")),
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(_) => {
            return Err(MalformedReason::InvalidField {
                field: "title",
                expected: "non-empty text",
            })
        }
    };

    let description = match root.get("description") {
        None => return Err(MalformedReason::MissingField("description")),
        Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(MalformedReason::InvalidField {
                field: "description",
                expected: "text",
            })
        }
    };

    let raw_questions = match field(&root, "questions") {
        None => return Err(MalformedReason::MissingField("questions")),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(MalformedReason::InvalidField {
                field: "questions",
                expected: "a list",
            })
        }
    };

    if raw_questions.is_empty() {
        return Err(MalformedReason::NoQuestions);
    }

    let questions = raw_questions
        .iter()
        .enumerate()
        .map(|(position, q)| validate_question(q, position))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizDocument {
        title,
        description,
        questions,
    })
}

/// Validate one question. `position` is zero-based; errors report it 1-based.
fn validate_question(value: &Value, position: usize) -> Result<QuestionSpec, MalformedReason> {
    let index = position + 1;
    let Value::Object(obj) = value else {
        return Err(MalformedReason::QuestionNotAnObject { index });
    };

    let prompt = match field(obj, "question_text") {
        None => {
            return Err(MalformedReason::QuestionMissingField {
                index,
                field: "question_text",
            })
        }
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(_) => {
            return Err(MalformedReason::QuestionInvalidField {
                index,
                field: "question_text",
                expected: "non-empty text",
            })
        }
    };

    let question_type = match field(obj, "question_type") {
        None => {
            return Err(MalformedReason::QuestionMissingField {
                index,
                field: "question_type",
            })
        }
        Some(Value::String(s)) => s
            .parse::<QuestionType>()
            .map_err(|_| MalformedReason::InvalidQuestionType {
                index,
                value: s.clone(),
            })?,
        Some(other) => {
            return Err(MalformedReason::InvalidQuestionType {
                index,
                value: other.to_string(),
            })
        }
    };

    let correct_answer = match field(obj, "correct_answer") {
        None => {
            return Err(MalformedReason::QuestionMissingField {
                index,
                field: "correct_answer",
            })
        }
        Some(v) => scalar_text(v)
            .filter(|s| !s.trim().is_empty())
            .ok_or(MalformedReason::QuestionInvalidField {
                index,
                field: "correct_answer",
                expected: "non-empty text",
            })?,
    };

    let kind = match question_type {
        QuestionType::MultipleChoice => QuestionKind::MultipleChoice {
            options: validate_options(obj, index)?,
        },
        QuestionType::TrueFalse => QuestionKind::TrueFalse,
        QuestionType::ShortAnswer => QuestionKind::ShortAnswer,
        QuestionType::Essay => QuestionKind::Essay,
    };

    let explanation = field(obj, "explanation")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);

    let points = match field(obj, "points") {
        None => default_points(),
        Some(v) => whole_number(v).ok_or(MalformedReason::QuestionInvalidField {
            index,
            field: "points",
            expected: "a non-negative integer",
        })?,
    };

    let difficulty = field(obj, "difficulty_level")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(default_difficulty_tag, str::to_string);

    Ok(QuestionSpec {
        prompt,
        kind,
        correct_answer,
        explanation,
        points,
        difficulty,
        position,
    })
}

fn validate_options(
    obj: &Map<String, Value>,
    index: usize,
) -> Result<Vec<String>, MalformedReason> {
    let Some(Value::Array(items)) = field(obj, "options") else {
        return Err(MalformedReason::MissingOptions { index });
    };

    if items.len() < 2 {
        return Err(MalformedReason::TooFewOptions {
            index,
            found: items.len(),
        });
    }

    items
        .iter()
        .map(|item| {
            scalar_text(item).ok_or(MalformedReason::QuestionInvalidField {
                index,
                field: "options",
                expected: "a list of text",
            })
        })
        .collect()
}

/// Look up a key, treating an explicit `null` the same as absence.
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// Text form of a scalar. Models sometimes emit `true` or `4` where text is
/// expected.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A non-negative integer that fits in `u32`; accepts `2.0` but not `2.5`.
fn whole_number(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            "Biology",
            "Grade 9",
            "Cells",
            2,
            Difficulty::Medium,
            QuestionType::ALL,
        )
        .unwrap()
    }

    const TWO_QUESTIONS: &str = r#"{
  "title": "Cells",
  "description": "Basics of cell biology",
  "questions": [
    {
      "question_text": "Which organelle produces ATP?",
      "question_type": "multiple_choice",
      "options": ["Nucleus", "Mitochondria", "Ribosome", "Golgi"],
      "correct_answer": "Mitochondria",
      "explanation": "Mitochondria run cellular respiration.",
      "points": 2,
      "difficulty_level": "easy",
      "order_index": 5
    },
    {
      "question_text": "Plant cells have a cell wall.",
      "question_type": "true_false",
      "correct_answer": "True",
      "order_index": 0
    }
  ]
}"#;

    fn reason(raw: &str) -> MalformedReason {
        extract_quiz(raw, &request()).unwrap_err().reason
    }

    #[test]
    fn extracts_prose_wrapped_fenced_quiz() {
        let raw = "Here is the quiz:\n```json\n{\"title\":\"T\",\"description\":\"D\",\"questions\":[{\"question_text\":\"Q1\",\"question_type\":\"true_false\",\"correct_answer\":\"True\"}]}\n```\n";
        let doc = extract_quiz(raw, &request()).unwrap();
        assert_eq!(doc.title, "T");
        assert_eq!(doc.description, "D");
        assert_eq!(doc.questions.len(), 1);
        let q = &doc.questions[0];
        assert_eq!(q.kind, QuestionKind::TrueFalse);
        assert_eq!(q.points, 1);
        assert_eq!(q.difficulty, "medium");
        assert_eq!(q.position, 0);
        assert!(q.kind.options().is_none());
    }

    #[test]
    fn fence_wrapping_does_not_change_result() {
        let plain = extract_quiz(TWO_QUESTIONS, &request()).unwrap();
        let fenced = format!("```json\n{TWO_QUESTIONS}\n```");
        let bare_fence = format!("Sure!\n```\n{TWO_QUESTIONS}\n```\nEnjoy.");
        assert_eq!(extract_quiz(&fenced, &request()).unwrap(), plain);
        assert_eq!(extract_quiz(&bare_fence, &request()).unwrap(), plain);
    }

    #[test]
    fn positions_follow_sequence_order() {
        let doc = extract_quiz(TWO_QUESTIONS, &request()).unwrap();
        for (i, q) in doc.questions.iter().enumerate() {
            assert_eq!(q.position, i);
        }
    }

    #[test]
    fn keeps_optional_fields_when_present() {
        let doc = extract_quiz(TWO_QUESTIONS, &request()).unwrap();
        let q = &doc.questions[0];
        assert_eq!(q.points, 2);
        assert_eq!(q.difficulty, "easy");
        assert_eq!(
            q.explanation.as_deref(),
            Some("Mitochondria run cellular respiration.")
        );
        assert_eq!(q.kind.options().map(<[String]>::len), Some(4));
    }

    #[test]
    fn missing_questions_field_fails() {
        assert_eq!(
            reason(r#"{"title": "T", "description": "D"}"#),
            MalformedReason::MissingField("questions")
        );
    }

    #[test]
    fn empty_questions_fails() {
        let raw = r#"{"title": "T", "description": "", "questions": []}"#;
        let err = extract_quiz(raw, &request()).unwrap_err();
        assert_eq!(err.reason, MalformedReason::NoQuestions);
        assert!(err.to_string().contains("at least one question"));
    }

    #[test]
    fn missing_title_or_description_fails() {
        assert_eq!(
            reason(r#"{"description": "D", "questions": []}"#),
            MalformedReason::MissingField("title")
        );
        assert_eq!(
            reason(r#"{"title": null, "description": "D", "questions": []}"#),
            MalformedReason::MissingField("title")
        );
        assert_eq!(
            reason(r#"{"title": "T", "questions": []}"#),
            MalformedReason::MissingField("description")
        );
    }

    #[test]
    fn empty_description_is_accepted() {
        let raw = r#"{"title": "T", "description": "", "questions": [
            {"question_text": "Q", "question_type": "essay", "correct_answer": "A"}]}"#;
        assert_eq!(extract_quiz(raw, &request()).unwrap().description, "");
    }

    #[test]
    fn multiple_choice_needs_two_options() {
        let one = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q", "question_type": "multiple_choice",
             "options": ["A"], "correct_answer": "A"}]}"#;
        let two = one.replace(r#"["A"]"#, r#"["A", "B"]"#);

        assert_eq!(
            reason(one),
            MalformedReason::TooFewOptions { index: 1, found: 1 }
        );
        let doc = extract_quiz(&two, &request()).unwrap();
        assert_eq!(
            doc.questions[0].kind,
            QuestionKind::MultipleChoice {
                options: vec!["A".into(), "B".into()]
            }
        );
    }

    #[test]
    fn multiple_choice_without_option_list_fails() {
        let missing = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q", "question_type": "true_false", "correct_answer": "True"},
            {"question_text": "Q", "question_type": "multiple_choice", "correct_answer": "A"}]}"#;
        let not_a_list = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q", "question_type": "multiple_choice",
             "options": "A, B", "correct_answer": "A"}]}"#;

        assert_eq!(
            reason(missing),
            MalformedReason::MissingOptions { index: 2 }
        );
        assert_eq!(
            reason(not_a_list),
            MalformedReason::MissingOptions { index: 1 }
        );
    }

    #[test]
    fn per_question_failures_cite_field_and_index() {
        let raw = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q1", "question_type": "essay", "correct_answer": "A"},
            {"question_text": "Q2", "question_type": "essay"}]}"#;
        let err = extract_quiz(raw, &request()).unwrap_err();
        assert_eq!(
            err.reason,
            MalformedReason::QuestionMissingField {
                index: 2,
                field: "correct_answer"
            }
        );
        assert_eq!(err.question_index(), Some(2));
    }

    #[test]
    fn unknown_question_type_fails() {
        let raw = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q", "question_type": "matching", "correct_answer": "A"}]}"#;
        assert_eq!(
            reason(raw),
            MalformedReason::InvalidQuestionType {
                index: 1,
                value: "matching".into()
            }
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let raw = r#"{"title": "T", "description": "D", "model": "x", "questions": [
            {"question_text": "Q", "question_type": "short_answer", "correct_answer": "A",
             "hint": "think", "tags": ["a"]}]}"#;
        assert!(extract_quiz(raw, &request()).is_ok());
    }

    #[test]
    fn non_multiple_choice_drops_options() {
        let raw = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q", "question_type": "true_false",
             "options": ["True", "False"], "correct_answer": "False"}]}"#;
        let doc = extract_quiz(raw, &request()).unwrap();
        assert!(doc.questions[0].kind.options().is_none());
    }

    #[test]
    fn scalar_answers_and_float_points_are_tolerated() {
        let raw = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q", "question_type": "true_false",
             "correct_answer": true, "points": 3.0}]}"#;
        let doc = extract_quiz(raw, &request()).unwrap();
        assert_eq!(doc.questions[0].correct_answer, "true");
        assert_eq!(doc.questions[0].points, 3);
    }

    #[test]
    fn negative_points_fail() {
        let raw = r#"{"title": "T", "description": "D", "questions": [
            {"question_text": "Q", "question_type": "essay",
             "correct_answer": "A", "points": -1}]}"#;
        assert!(matches!(
            reason(raw),
            MalformedReason::QuestionInvalidField {
                index: 1,
                field: "points",
                ..
            }
        ));
    }

    #[test]
    fn line_recovery_handles_trailing_brace_noise() {
        // The last `}` is in the trailing prose, so the outer span is invalid.
        let raw = "{\"title\": \"T\", \"description\": \"D\", \"questions\": [{\"question_text\": \"Q\", \"question_type\": \"essay\", \"correct_answer\": \"A\"}]}\nNote: use {braces} carefully }";
        let doc = extract_quiz(raw, &request()).unwrap();
        assert_eq!(doc.title, "T");
    }

    #[test]
    fn unparseable_text_keeps_raw_output() {
        let raw = "I'm sorry, I cannot generate that quiz.";
        let err = extract_quiz(raw, &request()).unwrap_err();
        assert!(matches!(err.reason, MalformedReason::Unparseable(_)));
        assert_eq!(err.raw_text(), raw);
    }

    #[test]
    fn top_level_array_is_rejected() {
        assert_eq!(reason("[1, 2, 3]"), MalformedReason::NotAnObject);
    }

    #[test]
    fn isolate_span_requires_ordered_braces() {
        assert_eq!(isolate_json_span("x {a} y"), "{a}");
        assert_eq!(isolate_json_span("  } nothing {  "), "} nothing {");
        assert_eq!(isolate_json_span("  plain  "), "plain");
    }
}
