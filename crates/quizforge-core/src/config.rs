//! quizforge configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, QuestionType};
use crate::scoring::{ScoringEngine, DEFAULT_PASSING_SCORE};

/// Top-level quizforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Minimum percentage for a passing result.
    #[serde(default = "default_passing_score")]
    pub passing_score: f64,
    /// Question count when a request doesn't specify one.
    #[serde(default = "default_question_count")]
    pub default_question_count: u32,
    #[serde(default)]
    pub default_difficulty: Difficulty,
    #[serde(default = "default_question_types")]
    pub default_question_types: Vec<QuestionType>,
    /// Model name reported alongside extracted quizzes.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_passing_score() -> f64 {
    DEFAULT_PASSING_SCORE
}
fn default_question_count() -> u32 {
    10
}
fn default_question_types() -> Vec<QuestionType> {
    vec![QuestionType::MultipleChoice]
}
fn default_model() -> String {
    "gemini-pro".to_string()
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            passing_score: default_passing_score(),
            default_question_count: default_question_count(),
            default_difficulty: Difficulty::default(),
            default_question_types: default_question_types(),
            model: default_model(),
        }
    }
}

impl QuizforgeConfig {
    /// Scoring engine using the configured passing score.
    pub fn scoring_engine(&self) -> ScoringEngine {
        ScoringEngine::with_passing_score(self.passing_score)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.passing_score),
            "passing_score must be between 0 and 100, got {}",
            self.passing_score
        );
        anyhow::ensure!(
            self.default_question_count >= 1,
            "default_question_count must be at least 1"
        );
        anyhow::ensure!(
            !self.default_question_types.is_empty(),
            "default_question_types must not be empty"
        );
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `QUIZFORGE_PASSING_SCORE`, `QUIZFORGE_MODEL`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => find_config_file(Path::new("."), dirs_path()),
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => QuizforgeConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// `quizforge.toml` in `dir` wins over `config.toml` in the global directory.
fn find_config_file(dir: &Path, global_dir: Option<PathBuf>) -> Option<PathBuf> {
    let local = dir.join("quizforge.toml");
    if local.exists() {
        return Some(local);
    }
    global_dir
        .map(|global| global.join("config.toml"))
        .filter(|global| global.exists())
}

fn apply_env_overrides(
    config: &mut QuizforgeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(score) = lookup("QUIZFORGE_PASSING_SCORE") {
        config.passing_score = score
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZFORGE_PASSING_SCORE: '{score}'"))?;
    }
    if let Some(model) = lookup("QUIZFORGE_MODEL") {
        config.model = model;
    }
    Ok(())
}

fn parse_config_file(path: &Path) -> Result<QuizforgeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<QuizforgeConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
