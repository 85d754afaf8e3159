//! Cleaner stage.
//!
//! Removes ASCII digits and a fixed punctuation set, then collapses the
//! whitespace left behind. Removed characters are deleted rather than
//! replaced, so `"ARBOL,EL"` becomes `"ARBOLEL"` while `"ARBOL, EL"` becomes
//! `"ARBOL EL"`.
//!
//! The punctuation set is the ASCII punctuation set
//! `` !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~ `` plus [`EXTENDED_PUNCTUATION`].
//!
//! # Examples
//!
//! ```
//! use palabras::analysis::stage::Stage;
//! use palabras::analysis::stage::clean::Cleaner;
//!
//! let cleaner = Cleaner::new().unwrap();
//! assert_eq!(cleaner.process("¿PISO 2, DPTO. 3B?"), "PISO DPTO B");
//! ```

use ahash::AHashSet;
use regex::Regex;

use super::Stage;
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// Spanish and typographic symbols removed in addition to ASCII punctuation.
pub const EXTENDED_PUNCTUATION: &[char] = &[
    '¡', '¿', '°', 'º', '-', '–', '•', '“', '”', '‘', '’', '´', 'ª', '¨',
];

const DIGIT_PATTERN: &str = r"[0-9]+";

/// A stage that strips digits and punctuation.
#[derive(Clone, Debug)]
pub struct Cleaner {
    digits: Regex,
    extra: AHashSet<char>,
}

impl Cleaner {
    /// Create a new cleaner with the default removal set.
    pub fn new() -> Result<Self> {
        Ok(Cleaner {
            digits: Regex::new(DIGIT_PATTERN)?,
            extra: EXTENDED_PUNCTUATION.iter().copied().collect(),
        })
    }

    /// Add characters to the removal set.
    ///
    /// Characters already in the set are ignored.
    pub fn with_extra_chars<I>(mut self, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.extra.extend(chars);
        self
    }

    /// Check whether a character is in the punctuation set of this cleaner.
    ///
    /// Digits are not part of the set; they are removed by the digit pattern
    /// before punctuation is deleted.
    pub fn is_punctuation(&self, c: char) -> bool {
        c.is_ascii_punctuation() || self.extra.contains(&c)
    }

    /// Clean a single string.
    pub fn clean(&self, text: &str) -> String {
        let without_digits = self.digits.replace_all(text, "");
        let without_punctuation: String = without_digits
            .chars()
            .filter(|&c| !self.is_punctuation(c))
            .collect();

        WhitespaceTokenizer::collapse(&without_punctuation)
    }
}

impl Stage for Cleaner {
    fn process(&self, text: &str) -> String {
        self.clean(text)
    }

    fn name(&self) -> &'static str {
        "clean"
    }
}
