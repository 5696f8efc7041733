//! Domain layer - Core types and traits

pub mod error;
pub mod llm;
pub mod prompt_store;
pub mod semantic_cache;
pub mod similarity;

pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use prompt_store::PromptStore;
pub use semantic_cache::{
    CacheHit, CompletionOutcome, CompletionSource, SemanticCacheConfig, SimilarityLookup,
};
pub use similarity::{jaccard_index, SimilarityScorer, TokenSet, Tokenizer};
