//! The `quizforge prompt` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::load_config_from;
use quizforge_core::model::{Difficulty, GenerationRequest, QuestionType};
use quizforge_core::prompt::quiz_prompt;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    subject: String,
    grade_level: String,
    topic: String,
    count: Option<u32>,
    difficulty: Option<String>,
    kinds: Option<String>,
    custom: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let difficulty = match difficulty {
        Some(d) => d.parse::<Difficulty>().map_err(|e| anyhow::anyhow!(e))?,
        None => config.default_difficulty,
    };

    let question_types: Vec<QuestionType> = match kinds {
        Some(k) => k
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<QuestionType>().map_err(|e| anyhow::anyhow!(e)))
            .collect::<Result<_>>()?,
        None => config.default_question_types.clone(),
    };

    let mut request = GenerationRequest::new(
        subject,
        grade_level,
        topic,
        count.unwrap_or(config.default_question_count),
        difficulty,
        question_types,
    )?;
    if let Some(custom) = custom {
        request = request.with_custom_prompt(custom);
    }

    println!("{}", quiz_prompt(&request));
    Ok(())
}
