use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state);

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics));
    }

    router.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::domain::llm::MockLlmProvider;
    use crate::domain::prompt_store::MockPromptStore;
    use crate::domain::PromptStore;
    use crate::infrastructure::prompt_store::InMemoryPromptStore;
    use crate::infrastructure::services::PromptCacheService;

    fn app_with(store: Arc<dyn PromptStore>, provider: Arc<MockLlmProvider>) -> Router {
        let service = PromptCacheService::new(store, provider);
        create_router(AppState::new(Arc::new(service)), None)
    }

    fn app(provider: MockLlmProvider) -> Router {
        app_with(Arc::new(InMemoryPromptStore::new()), Arc::new(provider))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(MockLlmProvider::new("mock"))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_live() {
        let response = app(MockLlmProvider::new("mock"))
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_reports_store_entries() {
        let response = app(MockLlmProvider::new("mock"))
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["checks"][0]["name"], "prompt_store");
        assert_eq!(json["checks"][0]["entries"], 0);
    }

    #[tokio::test]
    async fn test_ready_unhealthy_store() {
        let store = Arc::new(MockPromptStore::new().with_error("connection refused"));
        let response = app_with(store, Arc::new(MockLlmProvider::new("mock")))
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_completion_miss_then_hit() {
        let router = app(MockLlmProvider::new("mock").with_content("Paris"));

        let response = router
            .clone()
            .oneshot(post_json(
                "/v1/completions",
                serde_json::json!({"prompt": "What is the capital of France?"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["response"], "Paris");
        assert_eq!(json["cached"], false);
        assert!(json.get("matched_prompt").is_none());
        assert!(!json["id"].as_str().unwrap().is_empty());

        let response = router
            .oneshot(post_json(
                "/v1/completions",
                serde_json::json!({"prompt": "What's the capital city of France?"}),
            ))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["cached"], true);
        assert_eq!(json["matched_prompt"], "What is the capital of France?");
        assert_eq!(json["similarity"], 0.625);
    }

    #[tokio::test]
    async fn test_completion_empty_prompt() {
        let response = app(MockLlmProvider::new("mock"))
            .oneshot(post_json("/v1/completions", serde_json::json!({"prompt": ""})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_completion_missing_field() {
        let response = app(MockLlmProvider::new("mock"))
            .oneshot(post_json("/v1/completions", serde_json::json!({"text": "hi"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_completion_provider_failure() {
        let response = app(MockLlmProvider::new("mock").with_error("HTTP 500"))
            .oneshot(post_json("/v1/completions", serde_json::json!({"prompt": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "upstream_error");
    }

    #[tokio::test]
    async fn test_completion_store_failure() {
        let store = Arc::new(MockPromptStore::new().with_error("connection refused"));
        let response = app_with(store, Arc::new(MockLlmProvider::new("mock")))
            .oneshot(post_json("/v1/completions", serde_json::json!({"prompt": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_similarity() {
        let response = app(MockLlmProvider::new("mock"))
            .oneshot(post_json(
                "/v1/similarity",
                serde_json::json!({
                    "a": "What is the capital of France?",
                    "b": "What's the capital city of France?"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["score"], 0.625);
        assert_eq!(json["threshold"], 0.25);
        assert_eq!(json["would_hit"], true);
    }

    #[tokio::test]
    async fn test_metrics_route_absent_when_disabled() {
        let response = app(MockLlmProvider::new("mock"))
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
