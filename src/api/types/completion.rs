//! Request and response bodies for the v1 endpoints

use serde::{Deserialize, Serialize};

use crate::domain::CompletionOutcome;
use crate::infrastructure::services::SimilarityReport;

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub prompt: String,
    pub response: String,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl CompletionResponse {
    pub fn from_outcome(id: impl Into<String>, outcome: CompletionOutcome) -> Self {
        Self {
            id: id.into(),
            cached: outcome.is_cached(),
            matched_prompt: outcome.matched_prompt().map(str::to_string),
            similarity: outcome.similarity(),
            prompt: outcome.prompt,
            response: outcome.response,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityRequest {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub score: f64,
    pub threshold: f64,
    pub would_hit: bool,
}

impl From<SimilarityReport> for SimilarityResponse {
    fn from(report: SimilarityReport) -> Self {
        Self {
            score: report.score,
            threshold: report.threshold,
            would_hit: report.would_hit,
        }
    }
}
