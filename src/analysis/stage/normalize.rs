//! Normalizer stage.
//!
//! Produces the canonical form of a record: upper-case, with the acute
//! (ÁÉÍÓÚ), grave (ÀÈÌÒÙ) and circumflex (ÂÊÎÔÛ) vowels mapped to their bare
//! vowel, and whitespace collapsed to single spaces. Other diacritics such
//! as Ñ or Ü are preserved.
//!
//! # Examples
//!
//! ```
//! use palabras::analysis::stage::Stage;
//! use palabras::analysis::stage::normalize::Normalizer;
//!
//! let normalizer = Normalizer::new();
//! assert_eq!(normalizer.process("  El niño  comió "), "EL NIÑO COMIO");
//! ```

use super::Stage;
use crate::analysis::tokenizer::WhitespaceTokenizer;

/// A stage that case-folds and strips accent marks.
#[derive(Clone, Debug, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Normalizer
    }

    /// Map an upper-case accented vowel to its bare vowel.
    ///
    /// Only the three Spanish accent classes are handled; any other
    /// character is returned unchanged.
    pub fn strip_accent(c: char) -> char {
        match c {
            'Á' | 'À' | 'Â' => 'A',
            'É' | 'È' | 'Ê' => 'E',
            'Í' | 'Ì' | 'Î' => 'I',
            'Ó' | 'Ò' | 'Ô' => 'O',
            'Ú' | 'Ù' | 'Û' => 'U',
            _ => c,
        }
    }

    /// Normalize a single string.
    pub fn normalize(text: &str) -> String {
        // Upper-casing runs first so lower-case accents reach the mapping.
        let folded: String = text
            .chars()
            .flat_map(char::to_uppercase)
            .map(Self::strip_accent)
            .collect();

        WhitespaceTokenizer::collapse(&folded)
    }
}

impl Stage for Normalizer {
    fn process(&self, text: &str) -> String {
        Self::normalize(text)
    }

    fn name(&self) -> &'static str {
        "normalize"
    }
}
