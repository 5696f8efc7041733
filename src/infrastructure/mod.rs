//! Infrastructure layer - External service implementations

pub mod credentials;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod prompt_store;
pub mod services;
