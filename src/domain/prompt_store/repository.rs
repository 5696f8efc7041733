//! Prompt store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Key-value store holding prompt → response entries
///
/// Keys are raw prompt strings compared by exact equality. Entries never
/// expire; writes to an existing key replace its value.
#[async_trait]
pub trait PromptStore: Send + Sync + Debug {
    /// Enumerates every key currently in the store, in backend order
    async fn keys(&self) -> Result<Vec<String>, DomainError>;

    /// Gets the value stored under the exact key
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores a value under the exact key
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Returns the number of entries in the store
    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.keys().await?.len())
    }

    /// Checks whether the store holds no entries
    async fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len().await? == 0)
    }
}
