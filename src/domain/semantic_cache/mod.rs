//! Semantic cache domain
//!
//! Matches incoming prompts against previously cached prompts by lexical
//! similarity rather than requiring exact key matches.

mod config;
mod lookup;
mod outcome;

pub use config::SemanticCacheConfig;
pub use lookup::{CacheHit, SimilarityLookup};
pub use outcome::{CompletionOutcome, CompletionSource};
