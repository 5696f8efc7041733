use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, SimilarityRequest, SimilarityResponse};

/// POST /v1/similarity
pub async fn score_similarity(
    State(state): State<AppState>,
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResponse>, ApiError> {
    let report = state.cache_service.score(&request.a, &request.b);

    Ok(Json(report.into()))
}
