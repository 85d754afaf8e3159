//! Identity lemmatizer implementation.

use super::Lemmatizer;
use crate::error::Result;

/// Identity lemmatizer that returns every token unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentityLemmatizer;

impl IdentityLemmatizer {
    pub fn new() -> Self {
        IdentityLemmatizer
    }
}

impl Lemmatizer for IdentityLemmatizer {
    fn lemmas(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
