//! Redis prompt store implementation

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::debug;

use crate::domain::prompt_store::PromptStore;
use crate::domain::DomainError;

const SCAN_BATCH_SIZE: usize = 500;

/// Configuration for the Redis prompt store
#[derive(Debug, Clone)]
pub struct RedisPromptStoreConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
}

impl Default for RedisPromptStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: None,
        }
    }
}

impl RedisPromptStoreConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

/// Redis-backed prompt store
///
/// Prompts are stored as plain string keys with no expiry. When a key
/// prefix is configured, keys are written as `<prefix>:<prompt>` and the
/// prefix is stripped again on enumeration.
#[derive(Clone)]
pub struct RedisPromptStore {
    connection: ConnectionManager,
    config: RedisPromptStoreConfig,
}

impl fmt::Debug for RedisPromptStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisPromptStore")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisPromptStore {
    /// Connects to Redis
    pub async fn new(config: RedisPromptStoreConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::store(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::store(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    /// Connects to Redis with default configuration
    pub async fn with_url(url: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(RedisPromptStoreConfig::new(url)).await
    }

    fn prefix_key(&self, key: &str) -> String {
        prefix_key(self.config.key_prefix.as_deref(), key)
    }

    fn scan_pattern(&self) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{}:*", escape_glob(prefix)),
            None => "*".to_string(),
        }
    }
}

fn prefix_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key.to_string(),
    }
}

/// Turns a raw scanned key into a prompt, skipping keys that are not UTF-8
fn decode_key(prefix: Option<&str>, raw: Vec<u8>) -> Option<String> {
    match String::from_utf8(raw) {
        Ok(key) => strip_prefix(prefix, key),
        Err(e) => {
            debug!(
                key = %String::from_utf8_lossy(e.as_bytes()),
                "Skipping non-UTF-8 key during scan"
            );
            None
        }
    }
}

fn strip_prefix(prefix: Option<&str>, key: String) -> Option<String> {
    match prefix {
        Some(prefix) => key
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(str::to_string),
        None => Some(key),
    }
}

/// Escapes Redis glob metacharacters so a prefix matches literally
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());

    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[async_trait]
impl PromptStore for RedisPromptStore {
    async fn keys(&self) -> Result<Vec<String>, DomainError> {
        let pattern = self.scan_pattern();
        let prefix = self.config.key_prefix.as_deref();
        let mut conn = self.connection.clone();

        let mut cursor = 0u64;
        let mut seen = HashSet::new();
        let mut keys = Vec::new();

        loop {
            let (new_cursor, batch): (u64, Vec<Vec<u8>>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await
                .map_err(|e| DomainError::store(format!("Failed to scan keys: {}", e)))?;

            // SCAN may return a key more than once across iterations
            for key in batch {
                if seen.insert(key.clone()) {
                    if let Some(key) = decode_key(prefix, key) {
                        keys.push(key);
                    }
                }
            }

            cursor = new_cursor;

            if cursor == 0 {
                break;
            }
        }

        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: Option<String> = conn
            .get(&prefixed_key)
            .await
            .map_err(|e| DomainError::store(format!("Failed to get key '{}': {}", key, e)))?;

        Ok(result)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let _: () = conn
            .set(&prefixed_key, value)
            .await
            .map_err(|e| DomainError::store(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        if self.config.key_prefix.is_some() {
            return Ok(self.keys().await?.len());
        }

        let mut conn = self.connection.clone();

        redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(|e| DomainError::store(format!("Failed to get database size: {}", e)))
    }
}
