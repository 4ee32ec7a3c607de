//! The `quizforge grade` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizforge_core::config::load_config_from;
use quizforge_core::model::{GradingOutcome, PersistedQuestion, SubmittedAnswer};
use quizforge_core::scoring::ScoringEngine;

pub fn execute(
    questions_path: PathBuf,
    answers_path: PathBuf,
    passing_score: Option<f64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let engine = match passing_score {
        Some(score) => {
            anyhow::ensure!(
                (0.0..=100.0).contains(&score),
                "passing score must be between 0 and 100"
            );
            ScoringEngine::with_passing_score(score)
        }
        None => config.scoring_engine(),
    };

    let questions: Vec<PersistedQuestion> = read_json(&questions_path)?;
    let answers: Vec<SubmittedAnswer> = read_json(&answers_path)?;
    anyhow::ensure!(!questions.is_empty(), "quiz has no questions");
    tracing::debug!(
        "grading {} answer(s) against {} question(s), passing score {}",
        answers.len(),
        questions.len(),
        engine.passing_score()
    );

    let outcome = engine.grade(&questions, &answers);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        "text" => print_outcome(&outcome, &questions),
        other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_outcome(outcome: &GradingOutcome, questions: &[PersistedQuestion]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Result", "Points"]);

    for (item, question) in outcome.items.iter().zip(questions) {
        let result = match (item.answered, item.is_correct) {
            (false, _) => "UNANSWERED",
            (true, true) => "CORRECT",
            (true, false) => "WRONG",
        };
        table.add_row(vec![
            Cell::new(item.question_id),
            Cell::new(&question.spec.prompt),
            Cell::new(result),
            Cell::new(format!("{}/{}", item.points_earned, item.points_possible)),
        ]);
    }

    println!("{table}");
    println!(
        "Score: {}/{} ({:.2}%) {}",
        outcome.points_earned,
        outcome.total_points,
        outcome.percentage,
        if outcome.passed { "PASSED" } else { "FAILED" }
    );
    println!("Time spent: {}s", outcome.time_spent);
}
