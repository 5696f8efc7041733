//! Application services

mod prompt_cache_service;

pub use prompt_cache_service::{PromptCacheService, SimilarityReport};
