//! Prompt store infrastructure - store backends

mod factory;
mod in_memory;
mod redis;

pub use factory::{StoreConfig, StoreFactory, StoreType};
pub use in_memory::InMemoryPromptStore;
pub use self::redis::{RedisPromptStore, RedisPromptStoreConfig};
