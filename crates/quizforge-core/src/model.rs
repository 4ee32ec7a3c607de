//! Core data model types for quizforge.
//!
//! These are the types that flow between generation, extraction, and
//! grading: the request sent to a generator, the validated quiz document
//! recovered from its output, and the submission/outcome pair used by the
//! scoring engine.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidRequest;

/// The closed set of question kinds, without kind-specific data.
///
/// Used where only the kind matters, e.g. the set of kinds a generation
/// request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Essay,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::Essay,
    ];

    /// Wire name used in generated JSON and in the prompt template.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::ShortAnswer => "short_answer",
            QuestionType::Essay => "essay",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "true_false" => Ok(QuestionType::TrueFalse),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            "essay" => Ok(QuestionType::Essay),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A question kind together with the data only that kind carries.
///
/// Only multiple choice questions have an option list, so "options present
/// iff multiple choice" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "question_type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String> },
    TrueFalse,
    ShortAnswer,
    Essay,
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::TrueFalse => QuestionType::TrueFalse,
            QuestionKind::ShortAnswer => QuestionType::ShortAnswer,
            QuestionKind::Essay => QuestionType::Essay,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionKind::MultipleChoice { options } => Some(options),
            _ => None,
        }
    }
}

/// Difficulty tier requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Parameters for one AI quiz generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub subject: String,
    pub grade_level: String,
    pub topic: String,
    pub question_count: NonZeroU32,
    pub difficulty: Difficulty,
    /// Never empty; enforced by [`GenerationRequest::new`].
    pub question_types: BTreeSet<QuestionType>,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl GenerationRequest {
    /// Build a request, rejecting a zero count or an empty kind set.
    pub fn new(
        subject: impl Into<String>,
        grade_level: impl Into<String>,
        topic: impl Into<String>,
        question_count: u32,
        difficulty: Difficulty,
        question_types: impl IntoIterator<Item = QuestionType>,
    ) -> Result<Self, InvalidRequest> {
        let question_count =
            NonZeroU32::new(question_count).ok_or(InvalidRequest::ZeroQuestionCount)?;
        let question_types: BTreeSet<QuestionType> = question_types.into_iter().collect();
        if question_types.is_empty() {
            return Err(InvalidRequest::NoQuestionTypes);
        }
        Ok(Self {
            subject: subject.into(),
            grade_level: grade_level.into(),
            topic: topic.into(),
            question_count,
            difficulty,
            question_types,
            custom_prompt: None,
        })
    }

    pub fn with_custom_prompt(mut self, custom_prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(custom_prompt.into());
        self
    }
}

/// A validated quiz recovered from generator output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// At least one question, ordered by `position`.
    pub questions: Vec<QuestionSpec>,
}

/// A single validated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    #[serde(rename = "question_text")]
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(rename = "difficulty_level", default = "default_difficulty_tag")]
    pub difficulty: String,
    /// Zero-based index within the quiz.
    #[serde(rename = "order_index", default)]
    pub position: usize,
}

pub(crate) fn default_points() -> u32 {
    1
}

pub(crate) fn default_difficulty_tag() -> String {
    "medium".to_string()
}

/// Storage identity assigned to a question by the persistence layer.
pub type QuestionId = i64;

/// A question as stored for a quiz, with the identity answers refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedQuestion {
    pub id: QuestionId,
    #[serde(flatten)]
    pub spec: QuestionSpec,
}

/// One answer from a learner's submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    #[serde(default)]
    pub answer_text: String,
    /// Seconds spent on this item.
    #[serde(default)]
    pub time_spent: u64,
}

/// Grading result for a single question of the quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub question_id: QuestionId,
    pub answered: bool,
    pub is_correct: bool,
    pub points_earned: u64,
    pub points_possible: u64,
}

/// Result of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingOutcome {
    /// One entry per quiz question, in quiz order.
    pub items: Vec<ItemOutcome>,
    pub total_points: u64,
    pub points_earned: u64,
    /// 0..=100; 0 when the quiz is worth no points.
    pub percentage: f64,
    /// Seconds, summed over answers that matched a question.
    pub time_spent: u64,
    pub passed: bool,
    /// Always [`DEFAULT_ATTEMPT_NUMBER`]; whoever persists the result owns
    /// the real attempt sequence.
    pub attempt_number: u32,
}

pub const DEFAULT_ATTEMPT_NUMBER: u32 = 1;

impl GradingOutcome {
    pub fn answered_count(&self) -> usize {
        self.items.iter().filter(|i| i.answered).count()
    }

    pub fn correct_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_correct).count()
    }
}
