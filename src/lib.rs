//! Lexical prompt cache
//!
//! Answers chat prompts from a key-value store when a previously seen prompt
//! is similar enough by Jaccard index over word tokens, and otherwise calls
//! an OpenAI-compatible chat-completion API and caches the answer.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use tracing::info;

use domain::DomainError;
use infrastructure::llm::LlmProviderFactory;
use infrastructure::prompt_store::StoreFactory;
use infrastructure::services::PromptCacheService;

/// Wires the store and provider described by the configuration into a service
///
/// Fails on an out-of-range threshold, an unreachable store, or a missing API key.
pub async fn create_prompt_cache_service(
    config: &AppConfig,
) -> Result<PromptCacheService, DomainError> {
    config.cache.validate()?;

    let store = StoreFactory::new().create(&config.store).await?;
    let provider = LlmProviderFactory::create(&config.provider)?;

    info!(
        store = %config.store.backend,
        threshold = config.cache.similarity_threshold,
        single_flight = config.cache.single_flight,
        "Prompt cache service ready"
    );

    Ok(PromptCacheService::with_config(
        store,
        provider,
        &config.cache,
        config.provider.clone(),
    ))
}
