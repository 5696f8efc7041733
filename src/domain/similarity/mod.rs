//! Lexical similarity between prompts
//!
//! Prompts are reduced to sets of word tokens and compared with the
//! Jaccard index.

mod jaccard;
mod tokenizer;

pub use jaccard::{jaccard_index, score, SimilarityScorer};
pub use tokenizer::{TokenSet, Tokenizer};
