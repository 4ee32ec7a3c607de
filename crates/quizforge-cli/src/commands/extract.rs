//! The `quizforge extract` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::config::load_config_from;
use quizforge_core::extract::extract_document;
use quizforge_core::model::QuizDocument;

use super::read_input;

pub fn execute(input: PathBuf, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let raw = read_input(&input)?;
    let document = extract_document(&raw)?;
    tracing::debug!(
        "extracted '{}' with {} question(s)",
        document.title,
        document.questions.len()
    );

    match format.as_str() {
        "table" => print_table(&document, &config.model),
        "json" => println!("{}", serde_json::to_string_pretty(&document)?),
        other => anyhow::bail!("unknown format '{other}' (expected json or table)"),
    }

    Ok(())
}

fn print_table(document: &QuizDocument, model: &str) {
    println!("{}", document.title);
    if !document.description.is_empty() {
        println!("{}", document.description);
    }
    println!("Generated by: {model}");

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Type",
        "Question",
        "Answer",
        "Points",
        "Difficulty",
    ]);
    for q in &document.questions {
        table.add_row(vec![
            Cell::new(q.position + 1),
            Cell::new(q.kind.question_type()),
            Cell::new(&q.prompt),
            Cell::new(&q.correct_answer),
            Cell::new(q.points),
            Cell::new(&q.difficulty),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", document.questions.len());
}
