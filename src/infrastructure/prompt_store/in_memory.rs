//! In-memory prompt store implementation

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::prompt_store::PromptStore;
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Entries {
    /// Position of each key in `ordered`
    index: HashMap<String, usize>,
    ordered: Vec<(String, String)>,
}

/// Process-local prompt store
///
/// Keys are enumerated in insertion order. Overwriting a key keeps its
/// original position. Nothing is ever evicted.
#[derive(Debug, Default)]
pub struct InMemoryPromptStore {
    entries: RwLock<Entries>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromptStore for InMemoryPromptStore {
    async fn keys(&self) -> Result<Vec<String>, DomainError> {
        let entries = self.entries.read().await;

        Ok(entries.ordered.iter().map(|(k, _)| k.clone()).collect())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let entries = self.entries.read().await;

        Ok(entries
            .index
            .get(key)
            .map(|&position| entries.ordered[position].1.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;

        match entries.index.get(key).copied() {
            Some(position) => entries.ordered[position].1 = value.to_string(),
            None => {
                let position = entries.ordered.len();
                entries.index.insert(key.to_string(), position);
                entries.ordered.push((key.to_string(), value.to_string()));
            }
        }

        Ok(())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.entries.read().await.ordered.len())
    }
}
