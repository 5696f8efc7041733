//! Jaccard similarity over token sets

use super::tokenizer::{TokenSet, Tokenizer};

/// `|A ∩ B| / |A ∪ B|`, or 0 when both sets are empty
pub fn jaccard_index(a: &TokenSet, b: &TokenSet) -> f64 {
    let union = a.union_len(b);

    if union == 0 {
        return 0.0;
    }

    a.intersection_len(b) as f64 / union as f64
}

/// Scores prompt pairs with a fixed tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    tokenizer: Tokenizer,
}

impl SimilarityScorer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn tokenize(&self, text: &str) -> TokenSet {
        self.tokenizer.tokenize(text)
    }

    pub fn score(&self, a: &str, b: &str) -> f64 {
        jaccard_index(&self.tokenize(a), &self.tokenize(b))
    }
}

/// Similarity of two prompts using the default case-folding tokenizer
pub fn score(a: &str, b: &str) -> f64 {
    SimilarityScorer::default().score(a, b)
}
