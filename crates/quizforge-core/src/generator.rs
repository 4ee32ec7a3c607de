//! Generation orchestration: prompt → text generator → extraction.
//!
//! The text generator is an opaque capability behind [`TextGenerator`].
//! Nothing here retries or times out; callers decide whether to re-invoke.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::extract::extract_quiz;
use crate::insights::{
    extract_performance_analysis, extract_table_of_contents, Chapter, PerformanceAnalysis,
};
use crate::model::{GenerationRequest, QuizDocument};
use crate::prompt::{performance_analysis_prompt, quiz_prompt, table_of_contents_prompt};
use crate::statistics::ResultSummary;

/// A backend that turns a prompt into raw completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable generator name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Produce a completion for the prompt.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Drives a [`TextGenerator`] and recovers structured results from it.
#[derive(Clone)]
pub struct QuizGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl QuizGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Generate and validate a quiz for the request.
    pub async fn generate_quiz(
        &self,
        request: &GenerationRequest,
    ) -> Result<QuizDocument, GenerationError> {
        let prompt = quiz_prompt(request);
        let start = Instant::now();

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::error!("quiz generation failed for '{}': {e:#}", request.topic);
            GenerationError::Provider {
                generator: self.generator.name().to_string(),
                source: e.into(),
            }
        })?;

        let document = extract_quiz(&raw, request)?;
        tracing::info!(
            "generated quiz '{}' with {} questions in {}ms",
            document.title,
            document.questions.len(),
            start.elapsed().as_millis()
        );
        Ok(document)
    }

    /// Generate a table of contents. Any failure yields no chapters.
    pub async fn table_of_contents(&self, subject: &str, grade_level: &str) -> Vec<Chapter> {
        let prompt = table_of_contents_prompt(subject, grade_level);
        match self.generator.generate(&prompt).await {
            Ok(raw) => extract_table_of_contents(&raw),
            Err(e) => {
                tracing::error!("table of contents generation failed: {e:#}");
                Vec::new()
            }
        }
    }

    /// Ask the generator to analyze results. Any failure yields the zero
    /// analysis.
    pub async fn analyze_performance(&self, results: &[ResultSummary]) -> PerformanceAnalysis {
        let prompt = performance_analysis_prompt(results);
        match self.generator.generate(&prompt).await {
            Ok(raw) => extract_performance_analysis(&raw),
            Err(e) => {
                tracing::error!("performance analysis failed: {e:#}");
                PerformanceAnalysis::default()
            }
        }
    }
}
