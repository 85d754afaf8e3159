//! Tokenizers for records and corpora.
//!
//! Two tokenizers cover the needs of the pipeline:
//!
//! - [`WhitespaceTokenizer`] splits a record into its tokens. Every stage uses
//!   it to collapse whitespace runs and to iterate over tokens, and frequency
//!   tables count its tokens by default.
//! - [`WordBoundaryTokenizer`] splits text on Unicode word boundaries
//!   (UAX #29). Whitespace segments are skipped and symbols such as `«` or
//!   `…` become tokens of their own. Frequency tables can opt into it through
//!   `FrequencyTable::from_records_with`.

use unicode_segmentation::UnicodeSegmentation;

/// Trait for tokenizers that split text into borrowed tokens.
pub trait Tokenizer: Send + Sync {
    /// Split the given text into tokens, in order of appearance.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on Unicode whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    /// Rejoin the tokens of `text` with a single space.
    ///
    /// Leading and trailing whitespace disappears and every internal run of
    /// whitespace (spaces, tabs, newlines, no-break spaces) becomes one space.
    pub fn collapse(text: &str) -> String {
        Self::join(text.split_whitespace())
    }

    /// Join tokens with a single space.
    pub fn join<'a, I>(tokens: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut output = String::new();
        for token in tokens {
            if !output.is_empty() {
                output.push(' ');
            }
            output.push_str(token);
        }
        output
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug, Default)]
pub struct WordBoundaryTokenizer;

impl WordBoundaryTokenizer {
    /// Create a new word boundary tokenizer.
    pub fn new() -> Self {
        WordBoundaryTokenizer
    }
}

impl Tokenizer for WordBoundaryTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_word_bounds()
            .filter(|segment| !segment.chars().all(char::is_whitespace))
            .collect()
    }

    fn name(&self) -> &'static str {
        "word_boundary"
    }
}
