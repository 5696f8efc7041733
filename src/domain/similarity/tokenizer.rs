//! Word tokenizer producing token sets

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// A token is a maximal run of Unicode word characters (letters, digits,
/// marks, connector punctuation). Everything else separates tokens, so
/// "What's" yields "What" and "s".
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("word pattern is a valid regex"));

/// Set of distinct tokens extracted from a prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: HashSet<String>,
}

impl TokenSet {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens present in both sets
    pub fn intersection_len(&self, other: &TokenSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        small.tokens.iter().filter(|t| large.contains(t)).count()
    }

    /// Number of tokens present in either set
    pub fn union_len(&self, other: &TokenSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Splits prompts on word boundaries
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    case_sensitive: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            case_sensitive: false,
        }
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep token case as written instead of folding to lowercase
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Ordered tokens, duplicates kept
    pub fn words<'a>(&self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        let case_sensitive = self.case_sensitive;

        WORD_PATTERN.find_iter(text).map(move |m| {
            if case_sensitive {
                m.as_str().to_string()
            } else {
                m.as_str().to_lowercase()
            }
        })
    }

    pub fn tokenize(&self, text: &str) -> TokenSet {
        self.words(text).collect()
    }
}
