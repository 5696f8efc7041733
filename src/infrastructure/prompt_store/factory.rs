//! Prompt store factory for runtime backend selection

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::prompt_store::PromptStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryPromptStore;
use super::redis::{RedisPromptStore, RedisPromptStoreConfig};

/// Supported store backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// Process-local store, lost on restart
    InMemory,
    /// Redis store
    #[default]
    Redis,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::InMemory => write!(f, "in_memory"),
            StoreType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for StoreType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(StoreType::InMemory),
            "redis" => Ok(StoreType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown store backend: {}. Valid backends: in_memory, redis",
                s
            ))),
        }
    }
}

/// Configuration for the prompt store
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backend to create
    #[serde(default)]
    pub backend: StoreType,
    /// Redis URL (required for the Redis backend)
    #[serde(default = "default_redis_url")]
    pub redis_url: Option<String>,
    /// Key prefix for namespacing
    #[serde(default)]
    pub key_prefix: Option<String>,
}

fn default_redis_url() -> Option<String> {
    Some("redis://127.0.0.1:6379".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreType::default(),
            redis_url: default_redis_url(),
            key_prefix: None,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for the in-memory store
    pub fn in_memory() -> Self {
        Self {
            backend: StoreType::InMemory,
            ..Default::default()
        }
    }

    /// Creates a configuration for the Redis store
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: StoreType::Redis,
            redis_url: Some(url.into()),
            key_prefix: None,
        }
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

/// Factory for creating prompt store instances
#[derive(Debug, Default)]
pub struct StoreFactory;

impl StoreFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates a store based on configuration
    pub async fn create(&self, config: &StoreConfig) -> Result<Arc<dyn PromptStore>, DomainError> {
        match config.backend {
            StoreType::InMemory => {
                info!("Using in-memory prompt store");
                Ok(Arc::new(InMemoryPromptStore::new()))
            }
            StoreType::Redis => {
                let url = config.redis_url.clone().ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for the Redis store")
                })?;

                let mut redis_config = RedisPromptStoreConfig::new(url);

                if let Some(prefix) = &config.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                info!(url = %redis_config.url, "Connecting to Redis prompt store");
                let store = RedisPromptStore::new(redis_config).await?;
                Ok(Arc::new(store))
            }
        }
    }
}
