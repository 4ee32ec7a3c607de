//! Error types for quiz generation.
//!
//! Grading has no error cases; everything here belongs to the generation
//! side: invalid requests, unrecoverable model output, and provider failures.

use thiserror::Error;

/// A generation request that cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("question count must be at least 1")]
    ZeroQuestionCount,

    #[error("at least one question type must be requested")]
    NoQuestionTypes,
}

/// Why a generated response could not be turned into a quiz.
///
/// Question indices are 1-based, matching how they are reported to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// Neither the strict nor the line-recovery parse produced JSON.
    #[error("no parseable JSON object found: {0}")]
    Unparseable(String),

    #[error("top-level value is not an object")]
    NotAnObject,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field {field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("quiz must have at least one question")]
    NoQuestions,

    #[error("question {index} is not an object")]
    QuestionNotAnObject { index: usize },

    #[error("question {index} missing required field: {field}")]
    QuestionMissingField { index: usize, field: &'static str },

    #[error("question {index} field {field} must be {expected}")]
    QuestionInvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("question {index} has invalid question type: {value}")]
    InvalidQuestionType { index: usize, value: String },

    #[error("question {index} (multiple choice) must have options")]
    MissingOptions { index: usize },

    #[error("question {index} (multiple choice) must have at least 2 options, found {found}")]
    TooFewOptions { index: usize, found: usize },
}

impl MalformedReason {
    /// 1-based index of the offending question, for per-question failures.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            MalformedReason::QuestionNotAnObject { index }
            | MalformedReason::QuestionMissingField { index, .. }
            | MalformedReason::QuestionInvalidField { index, .. }
            | MalformedReason::InvalidQuestionType { index, .. }
            | MalformedReason::MissingOptions { index }
            | MalformedReason::TooFewOptions { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Generator output that could not be recovered into a valid quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse generated quiz: {reason}")]
pub struct MalformedGenerationError {
    pub reason: MalformedReason,
    raw_text: String,
}

impl MalformedGenerationError {
    pub fn new(reason: MalformedReason, raw_text: impl Into<String>) -> Self {
        Self {
            reason,
            raw_text: raw_text.into(),
        }
    }

    /// The unmodified generator output, for diagnostics.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn question_index(&self) -> Option<usize> {
        self.reason.question_index()
    }
}

/// Failure of an end-to-end quiz generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid generation request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    /// The text generator itself failed; nothing was extracted.
    #[error("generator '{generator}' failed: {source}")]
    Provider {
        generator: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error(transparent)]
    Malformed(#[from] MalformedGenerationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_question_reasons_report_index() {
        let err = MalformedGenerationError::new(
            MalformedReason::QuestionMissingField {
                index: 3,
                field: "correct_answer",
            },
            "{}",
        );
        assert_eq!(err.question_index(), Some(3));
        assert_eq!(
            err.to_string(),
            "failed to parse generated quiz: question 3 missing required field: correct_answer"
        );
    }

    #[test]
    fn top_level_reasons_have_no_index() {
        assert_eq!(MalformedReason::NoQuestions.question_index(), None);
        assert_eq!(
            MalformedReason::MissingField("title").question_index(),
            None
        );
    }

    #[test]
    fn raw_text_is_preserved() {
        let err = MalformedGenerationError::new(
            MalformedReason::Unparseable("EOF".into()),
            "Sorry, I can't help with that.",
        );
        assert_eq!(err.raw_text(), "Sorry, I can't help with that.");
    }
}
