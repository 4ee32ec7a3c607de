//! The `quizforge toc` and `quizforge analyze` commands.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::insights::{extract_performance_analysis, extract_table_of_contents};

use super::read_input;

pub fn execute_toc(input: PathBuf) -> Result<()> {
    let raw = read_input(&input)?;
    let chapters = extract_table_of_contents(&raw);
    if chapters.is_empty() {
        eprintln!("No chapters found.");
    }
    println!("{}", serde_json::to_string_pretty(&chapters)?);
    Ok(())
}

pub fn execute_analyze(input: PathBuf) -> Result<()> {
    let raw = read_input(&input)?;
    let analysis = extract_performance_analysis(&raw);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
