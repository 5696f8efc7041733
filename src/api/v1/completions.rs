//! Prompt completion endpoint

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CompletionRequest, CompletionResponse, Json};

/// POST /v1/completions
pub async fn create_completion(
    State(state): State<AppState>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(request_id = %request_id, "Processing completion request");

    let outcome = state.cache_service.complete(&request.prompt).await?;

    info!(
        request_id = %request_id,
        cached = outcome.is_cached(),
        "Completion request finished"
    );

    Ok(Json(CompletionResponse::from_outcome(request_id, outcome)))
}
