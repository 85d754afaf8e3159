//! Rule-based Spanish lemmatizer.
//!
//! A lightweight stand-in for a statistical model. Each canonical token goes
//! through two steps:
//!
//! 1. Suffix rules, longest suffix first. The first rule whose suffix matches
//!    decides: the token is rewritten when the remaining stem keeps at least
//!    [`MIN_STEM_CHARS`] characters and is left alone otherwise. The default
//!    rules turn gerunds into infinitives (`CAMINANDO` to `CAMINAR`).
//! 2. Plural reduction, when no rule matched. `-ES` is dropped when the rest
//!    can end a Spanish word (`ARBOLES`, `ACCIONES`, `MESES`), vowel + `-CES`
//!    becomes `-Z` (`LUCES`), and otherwise a final `-S` after `A`, `E` or
//!    `O` is dropped (`CALLES`, `CASAS`, `PERROS`).
//!
//! Irregular forms are left to a [`DictionaryLemmatizer`].
//!
//! [`DictionaryLemmatizer`]: super::DictionaryLemmatizer

use super::Lemmatizer;
use crate::analysis::stage::normalize::Normalizer;
use crate::error::{PalabrasError, Result};

/// Minimum number of characters a stem must keep after a rewrite.
pub const MIN_STEM_CHARS: usize = 3;

const DEFAULT_RULES: &[(&str, &str)] = &[("IENDO", "ER"), ("ANDO", "AR")];

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U' | 'Ü')
}

/// Whether `last`, preceded by the vowel `before`, can close a singular word.
fn closes_word(last: char, before: char) -> bool {
    match last {
        'L' | 'R' | 'N' | 'D' | 'J' | 'Y' => true,
        // MESES, PAISES, DIOSES but not CLASES.
        'S' => matches!(before, 'E' | 'I' | 'O'),
        _ => false,
    }
}

/// Reduce a plural token to its singular form, if it looks like one.
fn singular(token: &str) -> Option<String> {
    let chars: Vec<char> = token.chars().collect();
    let n = chars.len();
    if n < 2 || chars[n - 1] != 'S' {
        return None;
    }

    if chars[n - 2] == 'E' && n - 2 >= MIN_STEM_CHARS {
        let base = &chars[..n - 2];
        let last = base[base.len() - 1];
        let before = base[base.len() - 2];
        if is_vowel(before) {
            if last == 'C' {
                let mut lemma: String = base[..base.len() - 1].iter().collect();
                lemma.push('Z');
                return Some(lemma);
            }
            if closes_word(last, before) {
                return Some(base.iter().collect());
            }
        }
    }

    if n - 1 >= MIN_STEM_CHARS && matches!(chars[n - 2], 'A' | 'E' | 'O') {
        return Some(chars[..n - 1].iter().collect());
    }
    None
}

/// Lemmatizer that rewrites suffixes of canonical tokens.
#[derive(Debug, Clone)]
pub struct SuffixLemmatizer {
    /// Rules sorted by descending suffix length.
    rules: Vec<(String, String)>,
}

impl SuffixLemmatizer {
    /// Create a lemmatizer with the default Spanish rules.
    pub fn new() -> Self {
        Self::from_rules(DEFAULT_RULES.iter().map(|&(s, r)| (s.to_string(), r.to_string())))
    }

    /// Create a lemmatizer with custom (suffix, replacement) rules.
    ///
    /// The rules replace the default gerund rules; plural reduction still
    /// applies to tokens no rule matches. Both sides are normalized like
    /// pipeline text. Rules with an empty suffix are ignored.
    pub fn with_rules<I, S, R>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: AsRef<str>,
    {
        let rules: Vec<(String, String)> = rules
            .into_iter()
            .map(|(suffix, replacement)| {
                (
                    Normalizer::normalize(suffix.as_ref()),
                    Normalizer::normalize(replacement.as_ref()),
                )
            })
            .filter(|(suffix, _)| !suffix.is_empty())
            .collect();

        if rules.is_empty() {
            return Err(PalabrasError::configuration(
                "suffix lemmatizer needs at least one rule",
            ));
        }

        Ok(Self::from_rules(rules))
    }

    fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut rules: Vec<(String, String)> = rules.into_iter().collect();
        // Stable sort keeps caller order among suffixes of equal length.
        rules.sort_by_key(|(suffix, _)| std::cmp::Reverse(suffix.chars().count()));
        SuffixLemmatizer { rules }
    }

    /// Lemmatize a single token.
    pub fn lemma(&self, token: &str) -> String {
        let matched = self.rules.iter().find_map(|(suffix, replacement)| {
            token
                .strip_suffix(suffix.as_str())
                .map(|stem| (stem, replacement))
        });

        match matched {
            Some((stem, replacement)) if stem.chars().count() >= MIN_STEM_CHARS => {
                format!("{stem}{replacement}")
            }
            Some(_) => token.to_string(),
            None => singular(token).unwrap_or_else(|| token.to_string()),
        }
    }
}

impl Default for SuffixLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for SuffixLemmatizer {
    fn lemmas(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(|token| self.lemma(token)).collect())
    }

    fn name(&self) -> &'static str {
        "suffix"
    }
}
