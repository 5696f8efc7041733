//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;
use crate::domain::llm::Usage;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics")
            .field("path", &self.path)
            .finish()
    }
}

/// Initialize Prometheus metrics
///
/// Returns `None` when disabled or when a global recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("prompt_cache_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path: config.path.clone(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Outcome of a similarity lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Hit,
    Miss,
}

impl LookupOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

/// Record a cache lookup
pub fn record_lookup(outcome: LookupOutcome) {
    counter!("prompt_cache_lookups_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record an upstream completion call
pub fn record_provider_call(provider: &str, success: bool, duration: Duration) {
    let labels = [
        ("provider", provider.to_string()),
        ("status", if success { "success" } else { "error" }.to_string()),
    ];

    counter!("prompt_cache_provider_calls_total", &labels).increment(1);
    histogram!("prompt_cache_provider_call_duration_seconds", &labels)
        .record(duration.as_secs_f64());
}

/// Record tokens billed for an upstream completion call
pub fn record_provider_usage(provider: &str, usage: &Usage) {
    let prompt = [("provider", provider.to_string()), ("kind", "prompt".to_string())];
    let completion = [("provider", provider.to_string()), ("kind", "completion".to_string())];

    counter!("prompt_cache_provider_tokens_total", &prompt)
        .increment(u64::from(usage.prompt_tokens));
    counter!("prompt_cache_provider_tokens_total", &completion)
        .increment(u64::from(usage.completion_tokens));
}

/// Record a response written to the store
pub fn record_admission() {
    counter!("prompt_cache_admissions_total").increment(1);
}
