//! quizforge-core: quiz generation recovery and grading.
//!
//! This crate turns unreliable generator output into validated quiz
//! documents and grades learner submissions against stored answer keys.
//! Both are pure functions of their inputs; the generator call itself sits
//! behind the [`generator::TextGenerator`] trait.

pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod insights;
pub mod mock;
pub mod model;
pub mod prompt;
pub mod scoring;
pub mod statistics;

pub use error::{GenerationError, InvalidRequest, MalformedGenerationError, MalformedReason};
pub use extract::extract_quiz;
pub use generator::{QuizGenerator, TextGenerator};
pub use model::{
    GenerationRequest, GradingOutcome, PersistedQuestion, QuestionKind, QuestionSpec,
    QuizDocument, SubmittedAnswer,
};
pub use scoring::{grade, ScoringEngine};
