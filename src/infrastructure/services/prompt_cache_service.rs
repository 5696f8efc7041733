//! Prompt cache service
//!
//! Answers prompts from the store when a lexically similar prompt was seen
//! before, and otherwise asks the completion provider and admits the answer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::llm::{FinishReason, LlmProvider};
use crate::domain::prompt_store::PromptStore;
use crate::domain::semantic_cache::{CompletionOutcome, SemanticCacheConfig, SimilarityLookup};
use crate::domain::DomainError;
use crate::infrastructure::llm::ProviderConfig;
use crate::infrastructure::observability::{
    record_admission, record_lookup, record_provider_call, record_provider_usage, LookupOutcome,
};

type SharedFetch = Shared<BoxFuture<'static, Result<String, DomainError>>>;
type InFlight = HashMap<String, SharedFetch>;

/// Similarity report for a pair of prompts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityReport {
    pub score: f64,
    pub threshold: f64,
    pub would_hit: bool,
}

/// Prompt cache in front of a completion provider
pub struct PromptCacheService {
    store: Arc<dyn PromptStore>,
    provider: Arc<dyn LlmProvider>,
    lookup: SimilarityLookup,
    settings: Arc<ProviderConfig>,
    single_flight: bool,
    in_flight: Arc<Mutex<InFlight>>,
}

impl std::fmt::Debug for PromptCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptCacheService")
            .field("store", &self.store)
            .field("provider", &self.provider.provider_name())
            .field("lookup", &self.lookup)
            .field("model", &self.settings.model)
            .field("single_flight", &self.single_flight)
            .finish()
    }
}

impl PromptCacheService {
    /// Create a service with default cache and provider settings
    pub fn new(store: Arc<dyn PromptStore>, provider: Arc<dyn LlmProvider>) -> Self {
        Self::with_config(
            store,
            provider,
            &SemanticCacheConfig::default(),
            ProviderConfig::default(),
        )
    }

    pub fn with_config(
        store: Arc<dyn PromptStore>,
        provider: Arc<dyn LlmProvider>,
        cache_config: &SemanticCacheConfig,
        settings: ProviderConfig,
    ) -> Self {
        Self {
            store,
            provider,
            lookup: SimilarityLookup::new(cache_config),
            settings: Arc::new(settings),
            single_flight: cache_config.single_flight,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn store(&self) -> &Arc<dyn PromptStore> {
        &self.store
    }

    pub fn threshold(&self) -> f64 {
        self.lookup.threshold()
    }

    /// Scores two prompts with the same tokenizer the cache uses
    pub fn score(&self, a: &str, b: &str) -> SimilarityReport {
        let score = self.lookup.scorer().score(a, b);

        SimilarityReport {
            score,
            threshold: self.lookup.threshold(),
            would_hit: self.lookup.is_match(score),
        }
    }

    /// Answers a prompt from the cache or the provider
    ///
    /// On a miss the provider answer is stored under the raw prompt before
    /// returning. Provider failures are returned and nothing is stored.
    pub async fn complete(&self, prompt: &str) -> Result<CompletionOutcome, DomainError> {
        if prompt.trim().is_empty() {
            return Err(DomainError::validation("Prompt must not be empty"));
        }

        if let Some(hit) = self.lookup.lookup(prompt, self.store.as_ref()).await? {
            record_lookup(LookupOutcome::Hit);
            info!(
                matched_prompt = %hit.key,
                similarity = hit.similarity,
                "Answered prompt from cache"
            );

            return Ok(CompletionOutcome::from_cache(prompt, hit));
        }

        record_lookup(LookupOutcome::Miss);
        info!("No cached prompt cleared the threshold, calling provider");

        let response = if self.single_flight {
            self.fetch_shared(prompt).await?
        } else {
            self.fetch(prompt).await?
        };

        Ok(CompletionOutcome::from_provider(prompt, response))
    }

    /// Starts the provider call and write-back on its own task
    ///
    /// The task runs to completion even if every caller is dropped, so a
    /// paid-for answer is always admitted.
    fn spawn_fetch(&self, prompt: &str) -> JoinHandle<Result<String, DomainError>> {
        tokio::spawn(fetch_and_admit(
            Arc::clone(&self.store),
            Arc::clone(&self.provider),
            Arc::clone(&self.settings),
            prompt.to_string(),
        ))
    }

    async fn fetch(&self, prompt: &str) -> Result<String, DomainError> {
        join_fetch(self.spawn_fetch(prompt)).await
    }

    /// Joins an in-flight fetch for the identical prompt, or starts one
    async fn fetch_shared(&self, prompt: &str) -> Result<String, DomainError> {
        let shared = {
            let mut in_flight = self.lock_in_flight()?;

            match in_flight.get(prompt) {
                Some(existing) => {
                    debug!("Joining in-flight provider call for identical prompt");
                    existing.clone()
                }
                None => {
                    // The task removes its own entry; it cannot do so before
                    // the insert below because the registry lock is held here.
                    let registry = Arc::clone(&self.in_flight);
                    let key = prompt.to_string();
                    let handle = self.spawn_fetch(prompt);

                    let fetch = async move {
                        let result = join_fetch(handle).await;

                        if let Ok(mut in_flight) = registry.lock() {
                            in_flight.remove(&key);
                        }

                        result
                    }
                    .boxed()
                    .shared();

                    in_flight.insert(prompt.to_string(), fetch.clone());
                    fetch
                }
            }
        };

        shared.await
    }

    fn lock_in_flight(&self) -> Result<MutexGuard<'_, InFlight>, DomainError> {
        self.in_flight
            .lock()
            .map_err(|_| DomainError::internal("In-flight request registry is poisoned"))
    }
}

async fn join_fetch(
    handle: JoinHandle<Result<String, DomainError>>,
) -> Result<String, DomainError> {
    handle
        .await
        .map_err(|e| DomainError::internal(format!("Provider task failed: {}", e)))?
}

async fn fetch_and_admit(
    store: Arc<dyn PromptStore>,
    provider: Arc<dyn LlmProvider>,
    settings: Arc<ProviderConfig>,
    prompt: String,
) -> Result<String, DomainError> {
    let request = settings.build_request(&prompt);
    let started = Instant::now();

    let result = provider.chat(&settings.model, request).await;
    record_provider_call(provider.provider_name(), result.is_ok(), started.elapsed());

    let response = result.map_err(|e| {
        warn!(error = %e, "Provider call failed, nothing cached");
        e
    })?;

    if let Some(ref usage) = response.usage {
        record_provider_usage(provider.provider_name(), usage);
    }

    if response.is_truncated() {
        warn!(
            response_id = %response.id,
            "Provider answer hit the token limit and is cached truncated"
        );
    }

    let content = response.content().to_string();

    store.set(&prompt, &content).await?;
    record_admission();
    debug!(
        response_id = %response.id,
        finish_reason = response.finish_reason.as_ref().map(FinishReason::as_str),
        total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
        "Admitted provider response to store"
    );

    Ok(content)
}
