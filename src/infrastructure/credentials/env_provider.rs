use std::env;

use tracing::debug;

use crate::domain::DomainError;

/// Reads provider API keys from environment variables
#[derive(Debug, Clone)]
pub struct EnvApiKeyProvider {
    api_key_var: String,
}

impl EnvApiKeyProvider {
    pub fn new(api_key_var: impl Into<String>) -> Self {
        Self {
            api_key_var: api_key_var.into(),
        }
    }

    pub fn api_key_var(&self) -> &str {
        &self.api_key_var
    }

    /// Resolves the API key from the process environment
    pub fn resolve(&self) -> Result<String, DomainError> {
        self.resolve_with(|name| env::var(name).ok())
    }

    /// Resolves the API key through the given variable lookup
    ///
    /// Unset and blank values are both treated as missing.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<String, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(&self.api_key_var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                DomainError::configuration_missing(format!(
                    "Environment variable {} is not set",
                    self.api_key_var
                ))
            })?;

        debug!(var = %self.api_key_var, "Resolved API key from environment");

        Ok(value)
    }
}

impl Default for EnvApiKeyProvider {
    fn default() -> Self {
        Self::new("OPENAI_API_KEY")
    }
}
