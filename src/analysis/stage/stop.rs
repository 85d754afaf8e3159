//! Stopword removal.
//!
//! This module provides the [`StopwordSet`], a set of canonical stopwords, and
//! the [`StopwordFilter`] stage that removes its members from each record.
//!
//! A token only matches a stopword when both are in canonical form. The set
//! therefore runs every raw word through the [`Normalizer`] when it is built,
//! so `"él"`, `"Él"` and `"EL"` all end up as `EL`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use palabras::analysis::stage::Stage;
//! use palabras::analysis::stage::stop::{StopwordFilter, StopwordSet};
//!
//! let stopwords = StopwordSet::from_words(["el", "la", "de"]);
//! let filter = StopwordFilter::new(Arc::new(stopwords));
//!
//! assert_eq!(filter.process("EL PERRO DE LA CASA"), "PERRO CASA");
//! assert_eq!(filter.process("EL LA DE"), "");
//! ```

use std::io::BufRead;
use std::sync::Arc;

use ahash::AHashSet;

use super::Stage;
use super::normalize::Normalizer;
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// Default Spanish stopword list, in raw (accented, lower-case) form.
const SPANISH_STOP_WORDS: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las", "por", "un", "para",
    "con", "no", "una", "su", "al", "lo", "como", "más", "pero", "sus", "le", "ya", "o", "este",
    "sí", "porque", "esta", "entre", "cuando", "muy", "sin", "sobre", "también", "me", "hasta",
    "hay", "donde", "quien", "desde", "todo", "nos", "durante", "todos", "uno", "les", "ni",
    "contra", "otros", "ese", "eso", "ante", "ellos", "e", "esto", "mí", "antes", "algunos",
    "qué", "unos", "yo", "otro", "otras", "otra", "él", "tanto", "esa", "estos", "mucho",
    "quienes", "nada", "muchos", "cual", "poco", "ella", "estar", "estas", "algunas", "algo",
    "nosotros", "mi", "mis", "tú", "te", "ti", "tu", "tus", "ellas", "nosotras", "vosotros",
    "vosotras", "os", "mío", "mía", "míos", "mías", "tuyo", "tuya", "tuyos", "tuyas", "suyo",
    "suya", "suyos", "suyas", "nuestro", "nuestra", "nuestros", "nuestras", "vuestro",
    "vuestra", "vuestros", "vuestras", "esos", "esas", "estoy", "estás", "está", "estamos",
    "estáis", "están", "esté", "estés", "estemos", "estéis", "estén", "estaré", "estarás",
    "estará", "estaremos", "estaréis", "estarán", "estaría", "estarías", "estaríamos",
    "estaríais", "estarían", "estaba", "estabas", "estábamos", "estabais", "estaban", "estuve",
    "estuviste", "estuvo", "estuvimos", "estuvisteis", "estuvieron", "estuviera", "estuvieras",
    "estuviéramos", "estuvierais", "estuvieran", "estuviese", "estuvieses", "estuviésemos",
    "estuvieseis", "estuviesen", "estando", "estado", "estada", "estados", "estadas", "estad",
    "he", "has", "ha", "hemos", "habéis", "han", "haya", "hayas", "hayamos", "hayáis", "hayan",
    "habré", "habrás", "habrá", "habremos", "habréis", "habrán", "habría", "habrías",
    "habríamos", "habríais", "habrían", "había", "habías", "habíamos", "habíais", "habían",
    "hube", "hubiste", "hubo", "hubimos", "hubisteis", "hubieron", "hubiera", "hubieras",
    "hubiéramos", "hubierais", "hubieran", "hubiese", "hubieses", "hubiésemos", "hubieseis",
    "hubiesen", "habiendo", "habido", "habida", "habidos", "habidas", "soy", "eres", "es",
    "somos", "sois", "son", "sea", "seas", "seamos", "seáis", "sean", "seré", "serás", "será",
    "seremos", "seréis", "serán", "sería", "serías", "seríamos", "seríais", "serían", "era",
    "eras", "éramos", "erais", "eran", "fui", "fuiste", "fue", "fuimos", "fuisteis", "fueron",
    "fuera", "fueras", "fuéramos", "fuerais", "fueran", "fuese", "fueses", "fuésemos",
    "fueseis", "fuesen", "sintiendo", "sentido", "sentida", "sentidos", "sentidas", "siente",
    "sentid", "tengo", "tienes", "tiene", "tenemos", "tenéis", "tienen", "tenga", "tengas",
    "tengamos", "tengáis", "tengan", "tendré", "tendrás", "tendrá", "tendremos", "tendréis",
    "tendrán", "tendría", "tendrías", "tendríamos", "tendríais", "tendrían", "tenía", "tenías",
    "teníamos", "teníais", "tenían", "tuve", "tuviste", "tuvo", "tuvimos", "tuvisteis",
    "tuvieron", "tuviera", "tuvieras", "tuviéramos", "tuvierais", "tuvieran", "tuviese",
    "tuvieses", "tuviésemos", "tuvieseis", "tuviesen", "teniendo", "tenido", "tenida",
    "tenidos", "tenidas", "tened",
];

/// A set of stopwords in canonical form.
///
/// The only way to add words is through the [`Normalizer`], which keeps the
/// set symmetric with the tokens it is compared against.
#[derive(Clone, Debug, Default)]
pub struct StopwordSet {
    words: AHashSet<String>,
}

impl StopwordSet {
    /// Create an empty stopword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw words, normalizing each one.
    ///
    /// Words that normalize to an empty string are dropped. A raw entry that
    /// contains inner whitespace normalizes to a multi-token phrase and can
    /// never match a single token.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new().with_words(words)
    }

    /// Build the default Spanish stopword set.
    pub fn spanish() -> Self {
        Self::from_words(SPANISH_STOP_WORDS)
    }

    /// Load raw words from a reader, one per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            words.push(trimmed.to_string());
        }
        Ok(Self::from_words(words))
    }

    /// Add raw words to this set, normalizing each one.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let canonical = Normalizer::normalize(word.as_ref());
            if !canonical.is_empty() {
                self.words.insert(canonical);
            }
        }
        self
    }

    /// Check whether a canonical token is a stopword.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Get the number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the canonical stopwords in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// A stage that removes stopword tokens from each record.
#[derive(Clone, Debug)]
pub struct StopwordFilter {
    stopwords: Arc<StopwordSet>,
}

impl StopwordFilter {
    /// Create a new stopword filter over a shared set.
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        StopwordFilter { stopwords }
    }

    /// Get the stopword set used by this filter.
    pub fn stopwords(&self) -> &Arc<StopwordSet> {
        &self.stopwords
    }
}

impl Stage for StopwordFilter {
    fn process(&self, text: &str) -> String {
        WhitespaceTokenizer::join(
            text.split_whitespace()
                .filter(|token| !self.stopwords.contains(token)),
        )
    }

    fn name(&self) -> &'static str {
        "stopwords"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn filter_with(words: &[&str]) -> StopwordFilter {
        StopwordFilter::new(Arc::new(StopwordSet::from_words(words)))
    }

    #[test]
    fn test_stopword_filter() {
        let filter = filter_with(&["el"]);

        assert_eq!(filter.process("ARBOL EL PERRO CORRE"), "ARBOL PERRO CORRE");
    }

    #[test]
    fn test_all_stopwords_becomes_empty() {
        let filter = filter_with(&["el", "la", "de"]);

        assert_eq!(filter.process("EL LA DE"), "");
        assert_eq!(filter.process(""), "");
    }

    #[test]
    fn test_exact_token_match_only() {
        let filter = filter_with(&["de"]);

        assert_eq!(filter.process("DESDE DE DEDO"), "DESDE DEDO");
        // Lower-case tokens are not canonical and never match.
        assert_eq!(filter.process("de"), "de");
    }

    #[test]
    fn test_set_is_normalized() {
        let set = StopwordSet::from_words(["Él", " más ", "qué", "", "   "]);

        assert_eq!(set.len(), 3);
        assert!(set.contains("EL"));
        assert!(set.contains("MAS"));
        assert!(set.contains("QUE"));
        assert!(!set.contains("él"));
    }

    #[test]
    fn test_spanish_set() {
        let set = StopwordSet::spanish();

        for word in ["DE", "LA", "EL", "MAS", "ESTA", "TAMBIEN", "TU", "QUE"] {
            assert!(set.contains(word), "{word} should be a stopword");
        }
        assert!(!set.contains("PERRO"));
        // Accent stripping merges pairs such as "esta" / "está".
        assert!(set.len() < SPANISH_STOP_WORDS.len());
    }

    #[test]
    fn test_from_reader() {
        let input = "# articulos\nel\n\n  La \nlos\n";
        let set = StopwordSet::from_reader(Cursor::new(input)).unwrap();

        assert_eq!(set.len(), 3);
        assert!(set.contains("LA"));
    }

    #[test]
    fn test_with_words_extends() {
        let set = StopwordSet::from_words(["el"]).with_words(["sr", "sra"]);

        assert_eq!(set.len(), 3);
        assert!(set.contains("SRA"));
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(filter_with(&[]).name(), "stopwords");
    }
}
