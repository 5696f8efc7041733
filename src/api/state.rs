//! Application state shared by handlers

use std::sync::Arc;

use crate::infrastructure::services::PromptCacheService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub cache_service: Arc<PromptCacheService>,
}

impl AppState {
    pub fn new(cache_service: Arc<PromptCacheService>) -> Self {
        Self { cache_service }
    }
}
