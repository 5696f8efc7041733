//! Similarity-based lookup over a prompt store

use tracing::debug;

use super::SemanticCacheConfig;
use crate::domain::prompt_store::PromptStore;
use crate::domain::similarity::{jaccard_index, SimilarityScorer, Tokenizer};
use crate::domain::DomainError;

/// A stored prompt close enough to reuse
#[derive(Debug, Clone, PartialEq)]
pub struct CacheHit {
    /// The stored prompt that matched
    pub key: String,
    /// The response cached under that prompt
    pub value: String,
    /// Similarity between the incoming and stored prompt
    pub similarity: f64,
}

/// Finds the first stored prompt whose similarity clears the threshold
///
/// Keys are scanned in the order the store yields them. The first key
/// scoring strictly above the threshold wins, even if a later key would
/// score higher. Every lookup reads the full key set, so cost grows
/// linearly with the number of cached prompts.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityLookup {
    scorer: SimilarityScorer,
    threshold: f64,
}

impl Default for SimilarityLookup {
    fn default() -> Self {
        Self::new(&SemanticCacheConfig::default())
    }
}

impl SimilarityLookup {
    pub fn new(config: &SemanticCacheConfig) -> Self {
        let tokenizer = Tokenizer::new().with_case_sensitive(config.case_sensitive);

        Self {
            scorer: SimilarityScorer::new(tokenizer),
            threshold: config.similarity_threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Whether a score is high enough to count as a hit
    pub fn is_match(&self, similarity: f64) -> bool {
        similarity > self.threshold
    }

    /// Looks up a cached response for the prompt
    ///
    /// Returns `None` when the store is empty or no key with a non-empty
    /// value clears the threshold. Store failures are returned as-is.
    /// Nothing is written.
    pub async fn lookup(
        &self,
        prompt: &str,
        store: &dyn PromptStore,
    ) -> Result<Option<CacheHit>, DomainError> {
        let keys = store.keys().await?;
        let prompt_tokens = self.scorer.tokenize(prompt);

        for (position, key) in keys.iter().enumerate() {
            let similarity = jaccard_index(&prompt_tokens, &self.scorer.tokenize(key));

            if !self.is_match(similarity) {
                continue;
            }

            // The key may have been replaced or removed since enumeration.
            // An empty answer is never served.
            let value = match store.get(key).await? {
                Some(value) if !value.is_empty() => value,
                _ => {
                    debug!(key = %key, "Matched key has no usable value, continuing scan");
                    continue;
                }
            };

            debug!(
                scanned = position + 1,
                total = keys.len(),
                similarity,
                "Prompt cache hit"
            );

            return Ok(Some(CacheHit {
                key: key.clone(),
                value,
                similarity,
            }));
        }

        debug!(scanned = keys.len(), "Prompt cache miss");

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt_store::MockPromptStore;

    #[tokio::test]
    async fn test_identical_prompt_hits() {
        let store = MockPromptStore::new().with_entry("hello world", "greeting response");
        let lookup = SimilarityLookup::default();

        let hit = lookup.lookup("hello world", &store).await.unwrap().unwrap();

        assert_eq!(hit.key, "hello world");
        assert_eq!(hit.value, "greeting response");
        assert_eq!(hit.similarity, 1.0);
    }

    #[tokio::test]
    async fn test_paraphrase_hits() {
        let store =
            MockPromptStore::new().with_entry("What is the capital of France?", "Paris");
        let lookup = SimilarityLookup::default();

        let hit = lookup
            .lookup("What's the capital city of France?", &store)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(hit.value, "Paris");
        assert!((hit.similarity - 0.625).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_empty_store_misses() {
        let store = MockPromptStore::new();
        let lookup = SimilarityLookup::default();

        assert!(lookup.lookup("anything", &store).await.unwrap().is_none());
        assert!(lookup.lookup("", &store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unrelated_prompt_misses() {
        let store = MockPromptStore::new().with_entry("hello world", "greeting response");
        let lookup = SimilarityLookup::default();

        let result = lookup.lookup("quantum chromodynamics", &store).await.unwrap();

        assert!(result.is_none());
        assert_eq!(store.get_count(), 0);
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        // {a, b} vs {a, b, c, d, e, f, g, h}: 2 / 8 = 0.25 exactly
        let store = MockPromptStore::new().with_entry("a b c d e f g h", "v");
        let lookup = SimilarityLookup::default();

        assert!(lookup.lookup("a b", &store).await.unwrap().is_none());

        // {a, b, c} vs the same key: 3 / 8
        assert!(lookup.lookup("a b c", &store).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_first_match_in_scan_order_wins() {
        let store = MockPromptStore::new()
            .with_entry("red green blue yellow", "partial")
            .with_entry("red green blue", "exact");
        let lookup = SimilarityLookup::default();

        let hit = lookup.lookup("red green blue", &store).await.unwrap().unwrap();

        assert_eq!(hit.value, "partial");
        assert!((hit.similarity - 0.75).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_dangling_key_is_skipped() {
        let store = MockPromptStore::new()
            .with_dangling_key("hello world")
            .with_entry("hello there world", "fallback");
        let lookup = SimilarityLookup::default();

        let hit = lookup.lookup("hello world", &store).await.unwrap().unwrap();

        assert_eq!(hit.key, "hello there world");
        assert_eq!(hit.value, "fallback");
    }

    #[tokio::test]
    async fn test_empty_value_is_a_miss() {
        let store = MockPromptStore::new().with_entry("hello world", "");
        let lookup = SimilarityLookup::default();

        assert!(lookup.lookup("hello world", &store).await.unwrap().is_none());
        assert_eq!(store.get_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_value_falls_through_to_next_match() {
        let store = MockPromptStore::new()
            .with_entry("hello world", "")
            .with_entry("hello there world", "fallback");
        let lookup = SimilarityLookup::default();

        let hit = lookup.lookup("hello world", &store).await.unwrap().unwrap();

        assert_eq!(hit.key, "hello there world");
        assert_eq!(hit.value, "fallback");
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let store = MockPromptStore::new().with_error("connection refused");
        let lookup = SimilarityLookup::default();

        let result = lookup.lookup("hello", &store).await;

        assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_lookup_is_idempotent_and_read_only() {
        let store = MockPromptStore::new()
            .with_entry("hello world", "greeting response")
            .with_entry("goodbye world", "farewell");
        let lookup = SimilarityLookup::default();

        let first = lookup.lookup("hello big world", &store).await.unwrap();
        let second = lookup.lookup("hello big world", &store).await.unwrap();

        assert_eq!(first, second);
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_case_sensitive_config() {
        let store = MockPromptStore::new().with_entry("HELLO WORLD", "shouting");

        let folded = SimilarityLookup::default();
        assert!(folded.lookup("hello world", &store).await.unwrap().is_some());

        let exact =
            SimilarityLookup::new(&SemanticCacheConfig::new().with_case_sensitive(true));
        assert!(exact.lookup("hello world", &store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_custom_threshold() {
        let store =
            MockPromptStore::new().with_entry("What is the capital of France?", "Paris");
        let strict =
            SimilarityLookup::new(&SemanticCacheConfig::new().with_similarity_threshold(0.7));

        let result = strict
            .lookup("What's the capital city of France?", &store)
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
