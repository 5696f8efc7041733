//! API request/response types

mod completion;
mod error;
mod json;

pub use completion::{CompletionRequest, CompletionResponse, SimilarityRequest, SimilarityResponse};
pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use json::{Json, JsonRejection};
