//! Semantic cache configuration

use serde::Deserialize;

use crate::domain::DomainError;

/// Configuration for similarity-based cache lookup
#[derive(Debug, Clone, Deserialize)]
pub struct SemanticCacheConfig {
    /// A stored prompt is reused when its score is strictly above this value
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Compare tokens exactly as written instead of case-folding them
    #[serde(default)]
    pub case_sensitive: bool,

    /// Collapse concurrent misses for the identical prompt into one upstream call
    #[serde(default = "default_true")]
    pub single_flight: bool,
}

fn default_similarity_threshold() -> f64 {
    0.25
}

fn default_true() -> bool {
    true
}

impl Default for SemanticCacheConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            case_sensitive: false,
            single_flight: default_true(),
        }
    }
}

impl SemanticCacheConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set whether token comparison is case sensitive
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set whether concurrent identical misses are coalesced
    pub fn with_single_flight(mut self, single_flight: bool) -> Self {
        self.single_flight = single_flight;
        self
    }

    /// Rejects thresholds outside [0, 1]
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(DomainError::configuration(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SemanticCacheConfig::default();

        assert!((config.similarity_threshold - 0.25).abs() < f64::EPSILON);
        assert!(!config.case_sensitive);
        assert!(config.single_flight);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SemanticCacheConfig::new()
            .with_similarity_threshold(0.5)
            .with_case_sensitive(true)
            .with_single_flight(false);

        assert!((config.similarity_threshold - 0.5).abs() < f64::EPSILON);
        assert!(config.case_sensitive);
        assert!(!config.single_flight);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(SemanticCacheConfig::new()
            .with_similarity_threshold(1.5)
            .validate()
            .is_err());
        assert!(SemanticCacheConfig::new()
            .with_similarity_threshold(-0.1)
            .validate()
            .is_err());
        assert!(SemanticCacheConfig::new()
            .with_similarity_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: SemanticCacheConfig =
            serde_json::from_str(r#"{"case_sensitive": true}"#).unwrap();

        assert!(config.case_sensitive);
        assert!((config.similarity_threshold - 0.25).abs() < f64::EPSILON);
        assert!(config.single_flight);
    }
}
