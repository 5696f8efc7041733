use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use super::http_client::HttpClient;
use super::openai::{OpenAiProvider, DEFAULT_OPENAI_BASE_URL};
use crate::domain::{DomainError, LlmProvider, LlmRequest};
use crate::infrastructure::credentials::EnvApiKeyProvider;

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant. Give concise answers.".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    200
}

fn default_top_p() -> f32 {
    1.0
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl ProviderConfig {
    /// Builds the chat request sent upstream for a single prompt
    pub fn build_request(&self, prompt: &str) -> LlmRequest {
        LlmRequest::builder()
            .system(self.system_prompt.clone())
            .user(prompt)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .top_p(self.top_p)
            .build()
    }
}

/// Factory for creating the completion provider
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Creates the provider, reading the API key from the environment
    pub fn create(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = EnvApiKeyProvider::new(&config.api_key_env).resolve()?;

        Self::create_with_key(config, api_key)
    }

    pub fn create_with_key(
        config: &ProviderConfig,
        api_key: impl Into<String>,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
        let provider = OpenAiProvider::with_base_url(http_client, api_key, &config.base_url);

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Created OpenAI completion provider"
        );

        Ok(Arc::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;

    #[test]
    fn test_provider_config_defaults() {
        let config: ProviderConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(
            config.system_prompt,
            "You are a helpful assistant. Give concise answers."
        );
        assert_eq!(config.temperature, 0.8);
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_build_request() {
        let config = ProviderConfig::default();
        let request = config.build_request("What is Rust?");

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.user_text(), Some("What is Rust?"));
        assert_eq!(request.temperature, Some(0.8));
        assert_eq!(request.max_tokens, Some(200));
        assert_eq!(request.top_p, Some(1.0));
    }

    #[test]
    fn test_create_with_key() {
        let provider =
            LlmProviderFactory::create_with_key(&ProviderConfig::default(), "sk-test").unwrap();

        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_create_missing_key() {
        let config = ProviderConfig {
            api_key_env: "PROMPT_CACHE_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };

        let result = LlmProviderFactory::create(&config);
        assert!(matches!(result, Err(DomainError::ConfigurationMissing { .. })));
    }
}
