//! v1 API endpoints

pub mod completions;
pub mod similarity;

use axum::{routing::post, Router};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/completions", post(completions::create_completion))
        .route("/similarity", post(similarity::score_similarity))
}
