//! Best-effort extractors for supplementary generator output.
//!
//! These share the parse chain with quiz extraction but never fail: a table
//! of contents degrades to no chapters and a performance analysis degrades
//! to the all-zero analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extract::parse_generated_json;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub title: String,
    pub description: String,
    pub order_index: u32,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub title: String,
    pub description: String,
    pub order_index: u32,
    pub subtopics: Vec<Subtopic>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subtopic {
    pub title: String,
    pub description: String,
    pub order_index: u32,
}

/// Generator-written analysis of a set of quiz results.
///
/// `Default` is the fallback returned whenever the output is unusable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceAnalysis {
    pub overall_performance: OverallPerformance,
    pub recommendations: Vec<String>,
    pub difficulty_analysis: DifficultyAnalysis,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallPerformance {
    pub average_score: f64,
    pub completion_rate: f64,
    pub common_weaknesses: Vec<String>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyAnalysis {
    pub too_easy: Vec<String>,
    pub too_hard: Vec<String>,
    pub appropriate: Vec<String>,
}

/// Recover chapters from a table-of-contents response.
///
/// A missing `chapters` field means no chapters. Unparseable output or
/// chapters of the wrong shape also yield an empty list.
pub fn extract_table_of_contents(raw: &str) -> Vec<Chapter> {
    let value = match parse_generated_json(raw) {
        Ok(value) => value,
        Err(reason) => {
            tracing::warn!("table of contents unavailable: {reason}");
            return Vec::new();
        }
    };

    let Some(chapters) = value.get("chapters").filter(|v| !v.is_null()) else {
        return Vec::new();
    };

    match Vec::<Chapter>::deserialize(chapters) {
        Ok(chapters) => chapters,
        Err(e) => {
            tracing::warn!("table of contents has unexpected shape: {e}");
            Vec::new()
        }
    }
}

/// Recover a performance analysis, falling back to the zero analysis.
pub fn extract_performance_analysis(raw: &str) -> PerformanceAnalysis {
    let analysis = parse_generated_json(raw)
        .map_err(|reason| reason.to_string())
        .and_then(|value: Value| {
            if !value.is_object() {
                return Err("top-level value is not an object".to_string());
            }
            PerformanceAnalysis::deserialize(&value).map_err(|e| e.to_string())
        });

    analysis.unwrap_or_else(|e| {
        tracing::warn!("performance analysis unavailable: {e}");
        PerformanceAnalysis::default()
    })
}
