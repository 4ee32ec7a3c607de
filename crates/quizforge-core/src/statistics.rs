//! Aggregate statistics over graded submissions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{GradingOutcome, QuestionId};

/// Compact view of one graded submission, as sent to the analysis prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub attempt_number: u32,
    pub percentage: f64,
    pub points_earned: u64,
    pub total_points: u64,
    pub time_spent: u64,
    pub passed: bool,
    /// Questions answered incorrectly or left blank.
    pub missed_questions: Vec<QuestionId>,
}

impl From<&GradingOutcome> for ResultSummary {
    fn from(outcome: &GradingOutcome) -> Self {
        Self {
            attempt_number: outcome.attempt_number,
            percentage: outcome.percentage,
            points_earned: outcome.points_earned,
            total_points: outcome.total_points,
            time_spent: outcome.time_spent,
            passed: outcome.passed,
            missed_questions: outcome
                .items
                .iter()
                .filter(|i| !i.is_correct)
                .map(|i| i.question_id)
                .collect(),
        }
    }
}

/// Correct-answer rate for one question across attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub question_id: QuestionId,
    pub attempts: usize,
    pub correct: usize,
    pub correct_rate: f64,
}

/// Statistics across many graded submissions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub attempts: usize,
    /// Mean percentage, 0 when there are no attempts.
    pub average_percentage: f64,
    /// Share of attempts that passed, 0..=1.
    pub pass_rate: f64,
    /// Share of attempts with at least one answered item, 0..=1.
    pub completion_rate: f64,
    pub total_time_spent: u64,
    /// Per-question rates, hardest first. Ties are broken by question id.
    pub questions: Vec<QuestionStats>,
}

impl PerformanceSummary {
    /// The `n` questions with the lowest correct rate.
    pub fn hardest(&self, n: usize) -> &[QuestionStats] {
        &self.questions[..n.min(self.questions.len())]
    }
}

/// Summarize a set of grading outcomes.
pub fn summarize(outcomes: &[GradingOutcome]) -> PerformanceSummary {
    if outcomes.is_empty() {
        return PerformanceSummary::default();
    }

    let attempts = outcomes.len();
    let n = attempts as f64;

    let average_percentage = outcomes.iter().map(|o| o.percentage).sum::<f64>() / n;
    let pass_rate = outcomes.iter().filter(|o| o.passed).count() as f64 / n;
    let completion_rate = outcomes.iter().filter(|o| o.answered_count() > 0).count() as f64 / n;
    let total_time_spent = outcomes
        .iter()
        .fold(0u64, |acc, o| acc.saturating_add(o.time_spent));

    let mut per_question: HashMap<QuestionId, (usize, usize)> = HashMap::new();
    for item in outcomes.iter().flat_map(|o| &o.items) {
        let entry = per_question.entry(item.question_id).or_default();
        entry.0 += 1;
        if item.is_correct {
            entry.1 += 1;
        }
    }

    let mut questions: Vec<QuestionStats> = per_question
        .into_iter()
        .map(|(question_id, (attempts, correct))| QuestionStats {
            question_id,
            attempts,
            correct,
            correct_rate: correct as f64 / attempts as f64,
        })
        .collect();
    questions.sort_by(|a, b| {
        a.correct_rate
            .total_cmp(&b.correct_rate)
            .then(a.question_id.cmp(&b.question_id))
    });

    PerformanceSummary {
        attempts,
        average_percentage,
        pass_rate,
        completion_rate,
        total_time_spent,
        questions,
    }
}
