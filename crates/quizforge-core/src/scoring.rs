//! Deterministic grading of quiz submissions.
//!
//! Structured kinds (multiple choice, true/false) require normalized
//! equality with the answer key. Free-text kinds (short answer, essay) pass
//! when the normalized submission is contained in the normalized key. That
//! containment rule is asymmetric: a submission longer than the key, or one
//! that rephrases it, fails even when it is right. It is kept as-is
//! pending product review.

use std::collections::HashMap;

use crate::model::{
    GradingOutcome, ItemOutcome, PersistedQuestion, QuestionId, QuestionKind, SubmittedAnswer,
    DEFAULT_ATTEMPT_NUMBER,
};

/// Default minimum percentage for a passing result.
pub const DEFAULT_PASSING_SCORE: f64 = 60.0;

/// Trim and case-fold text before comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `submitted` is a correct answer for a question of `kind` with the
/// given canonical answer.
pub fn is_correct(kind: &QuestionKind, canonical: &str, submitted: &str) -> bool {
    let submitted = normalize(submitted);
    let canonical = normalize(canonical);
    match kind {
        QuestionKind::MultipleChoice { .. } | QuestionKind::TrueFalse => submitted == canonical,
        QuestionKind::ShortAnswer | QuestionKind::Essay => canonical.contains(&submitted),
    }
}

/// Grades submissions against a quiz's stored questions.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    passing_score: f64,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            passing_score: DEFAULT_PASSING_SCORE,
        }
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different pass threshold, clamped to 0..=100.
    pub fn with_passing_score(passing_score: f64) -> Self {
        Self {
            passing_score: passing_score.clamp(0.0, 100.0),
        }
    }

    pub fn passing_score(&self) -> f64 {
        self.passing_score
    }

    /// Grade one submission. Never fails.
    ///
    /// - Answers naming a question outside this quiz are skipped entirely,
    ///   including their time.
    /// - Questions without an answer are incorrect and earn nothing.
    /// - If a question is answered more than once, the first answer is
    ///   graded; later ones only contribute their time.
    pub fn grade(
        &self,
        questions: &[PersistedQuestion],
        answers: &[SubmittedAnswer],
    ) -> GradingOutcome {
        let known: HashMap<QuestionId, &PersistedQuestion> =
            questions.iter().map(|q| (q.id, q)).collect();

        let mut first_answer: HashMap<QuestionId, &SubmittedAnswer> = HashMap::new();
        let mut time_spent = 0u64;
        let mut skipped = 0usize;

        for answer in answers {
            if !known.contains_key(&answer.question_id) {
                skipped += 1;
                continue;
            }
            time_spent = time_spent.saturating_add(answer.time_spent);
            first_answer.entry(answer.question_id).or_insert(answer);
        }

        if skipped > 0 {
            tracing::debug!("skipped {skipped} answer(s) for questions outside this quiz");
        }

        let items: Vec<ItemOutcome> = questions
            .iter()
            .map(|q| {
                let points_possible = u64::from(q.spec.points);
                let answer = first_answer.get(&q.id);
                let is_correct = answer.is_some_and(|a| {
                    is_correct(&q.spec.kind, &q.spec.correct_answer, &a.answer_text)
                });
                ItemOutcome {
                    question_id: q.id,
                    answered: answer.is_some(),
                    is_correct,
                    points_earned: if is_correct { points_possible } else { 0 },
                    points_possible,
                }
            })
            .collect();

        let total_points: u64 = items.iter().map(|i| i.points_possible).sum();
        let points_earned: u64 = items.iter().map(|i| i.points_earned).sum();
        let percentage = if total_points > 0 {
            points_earned as f64 / total_points as f64 * 100.0
        } else {
            0.0
        };

        GradingOutcome {
            items,
            total_points,
            points_earned,
            percentage,
            time_spent,
            passed: percentage >= self.passing_score,
            attempt_number: DEFAULT_ATTEMPT_NUMBER,
        }
    }
}

/// Grade with the default passing score.
pub fn grade(questions: &[PersistedQuestion], answers: &[SubmittedAnswer]) -> GradingOutcome {
    ScoringEngine::default().grade(questions, answers)
}
