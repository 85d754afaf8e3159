//! Lemmatization services.
//!
//! The linguistic model that maps a word to its dictionary form lives behind
//! the [`Lemmatizer`] trait, so the pipeline never depends on a specific
//! model. Three implementations ship with the crate:
//!
//! - [`IdentityLemmatizer`] - Every token is its own lemma
//! - [`DictionaryLemmatizer`] - Form to lemma lookup table
//! - [`SuffixLemmatizer`] - Rule-based Spanish suffix rewriting

use crate::error::Result;

/// Trait for lemmatization services.
///
/// Implementations tokenize the text themselves and return one lemma per
/// token, in order. An implementation that cannot process a text returns an
/// error; the pipeline degrades that record to an empty string.
pub trait Lemmatizer: Send + Sync {
    /// Return the ordered lemmas of the tokens in `text`.
    fn lemmas(&self, text: &str) -> Result<Vec<String>>;

    /// Lemmatize `text` and join the lemmas with a single space.
    fn lemmatize(&self, text: &str) -> Result<String> {
        Ok(self.lemmas(text)?.join(" "))
    }

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

pub mod dictionary;
pub mod identity;
pub mod suffix;

pub use dictionary::DictionaryLemmatizer;
pub use identity::IdentityLemmatizer;
pub use suffix::SuffixLemmatizer;
