//! Result of answering a prompt through the cache

use serde::Serialize;

use super::CacheHit;

/// Where an answer came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CompletionSource {
    /// Reused from a stored prompt that cleared the threshold
    Cache {
        matched_prompt: String,
        similarity: f64,
    },
    /// Fetched upstream and admitted to the store
    Provider,
}

/// An answered prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionOutcome {
    pub prompt: String,
    pub response: String,
    #[serde(flatten)]
    pub source: CompletionSource,
}

impl CompletionOutcome {
    pub fn from_cache(prompt: impl Into<String>, hit: CacheHit) -> Self {
        Self {
            prompt: prompt.into(),
            response: hit.value,
            source: CompletionSource::Cache {
                matched_prompt: hit.key,
                similarity: hit.similarity,
            },
        }
    }

    pub fn from_provider(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
            source: CompletionSource::Provider,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.source, CompletionSource::Cache { .. })
    }

    /// The stored prompt that produced a cached answer
    pub fn matched_prompt(&self) -> Option<&str> {
        match &self.source {
            CompletionSource::Cache { matched_prompt, .. } => Some(matched_prompt),
            CompletionSource::Provider => None,
        }
    }

    pub fn similarity(&self) -> Option<f64> {
        match self.source {
            CompletionSource::Cache { similarity, .. } => Some(similarity),
            CompletionSource::Provider => None,
        }
    }
}
