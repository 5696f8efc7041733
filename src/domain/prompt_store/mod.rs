//! Prompt store domain - key-value storage of prompt responses

mod repository;

pub use repository::PromptStore;

#[cfg(test)]
pub use repository::mock::MockPromptStore;
