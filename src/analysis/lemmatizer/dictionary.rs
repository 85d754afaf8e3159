//! Dictionary lemmatizer implementation.
//!
//! Looks every token up in a form → lemma table. Forms and lemmas are stored
//! in canonical form, so a table written in ordinary Spanish spelling
//! (`corriendo` → `correr`) matches pipeline tokens (`CORRIENDO`). Forms missing
//! from the table are their own lemma.
//!
//! # Examples
//!
//! ```
//! use palabras::analysis::lemmatizer::{DictionaryLemmatizer, Lemmatizer};
//!
//! let lemmatizer =
//!     DictionaryLemmatizer::from_pairs([("corriendo", "correr"), ("perros", "perro")]);
//! assert_eq!(
//!     lemmatizer.lemmatize("PERROS CORRIENDO RAPIDO").unwrap(),
//!     "PERRO CORRER RAPIDO"
//! );
//! ```

use std::io::BufRead;

use ahash::AHashMap;

use super::Lemmatizer;
use crate::analysis::stage::normalize::Normalizer;
use crate::error::{PalabrasError, Result};

/// A lemmatizer backed by a lookup table.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    lemmas: AHashMap<String, String>,
}

impl DictionaryLemmatizer {
    /// Create an empty dictionary lemmatizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lemmatizer from (form, lemma) pairs.
    ///
    /// Later pairs override earlier ones for the same canonical form.
    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: AsRef<str>,
        L: AsRef<str>,
    {
        let mut lemmatizer = Self::new();
        for (form, lemma) in pairs {
            lemmatizer.insert(form.as_ref(), lemma.as_ref());
        }
        lemmatizer
    }

    /// Load a table from a reader with one `form<TAB>lemma` pair per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lemmatizer = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match trimmed.split_once('\t') {
                Some((form, lemma)) if !form.trim().is_empty() && !lemma.trim().is_empty() => {
                    lemmatizer.insert(form, lemma);
                }
                _ => {
                    return Err(PalabrasError::analysis(format!(
                        "line {} of the lemma table is not a form<TAB>lemma pair",
                        index + 1
                    )));
                }
            }
        }
        Ok(lemmatizer)
    }

    /// Add a form → lemma entry.
    pub fn insert(&mut self, form: &str, lemma: &str) {
        let form = Normalizer::normalize(form);
        let lemma = Normalizer::normalize(lemma);
        if !form.is_empty() && !lemma.is_empty() {
            self.lemmas.insert(form, lemma);
        }
    }

    /// Look up the lemma of a single form.
    pub fn lookup(&self, form: &str) -> Option<&str> {
        self.lemmas
            .get(&Normalizer::normalize(form))
            .map(String::as_str)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmas(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split_whitespace()
            .map(|token| self.lookup(token).unwrap_or(token).to_string())
            .collect())
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
