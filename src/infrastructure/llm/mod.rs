//! LLM provider implementations

mod http_client;
mod openai;
mod provider_factory;

pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::OpenAiProvider;
pub use provider_factory::{LlmProviderFactory, ProviderConfig};
