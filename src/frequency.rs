//! Frequency dictionary of a normalized corpus.
//!
//! A [`FrequencyTable`] counts how often every distinct token occurs across a
//! batch of records. The records are joined into one corpus with single
//! spaces and split on whitespace, so the frequencies always sum to the
//! number of tokens in the corpus. Entries are unique by word and sorted
//! ascending by word.
//!
//! # Examples
//!
//! ```
//! use palabras::frequency::FrequencyTable;
//!
//! let records = vec!["PERRO GATO".to_string(), "PERRO".to_string(), String::new()];
//! let table = FrequencyTable::from_records(&records);
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.entries()[0].word, "GATO");
//! assert_eq!(table.frequency("PERRO"), Some(2));
//! assert_eq!(table.total(), 3);
//! ```

use std::cmp::Reverse;
use std::io::Write;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::Result;

/// A word and the number of times it occurs in the corpus.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub word: String,
    pub frequency: u64,
}

impl FrequencyEntry {
    pub fn new<S: Into<String>>(word: S, frequency: u64) -> Self {
        FrequencyEntry {
            word: word.into(),
            frequency,
        }
    }
}

/// Column names used when a table is written to a tabular sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeaders {
    pub word: String,
    pub frequency: String,
}

impl ColumnHeaders {
    pub fn new<W: Into<String>, F: Into<String>>(word: W, frequency: F) -> Self {
        ColumnHeaders {
            word: word.into(),
            frequency: frequency.into(),
        }
    }

    /// Spanish column names, `PALABRA` / `FRECUENCIA`.
    pub fn spanish() -> Self {
        Self::new("PALABRA", "FRECUENCIA")
    }
}

impl Default for ColumnHeaders {
    /// English column names, `WORD` / `FREQUENCY`.
    fn default() -> Self {
        Self::new("WORD", "FREQUENCY")
    }
}

/// A word frequency table sorted ascending by word.
///
/// Only serialized: a table is always built from records so its order and
/// uniqueness hold for [`FrequencyTable::frequency`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Build a table from pipeline output, one token per whitespace-delimited word.
    pub fn from_records(records: &[String]) -> Self {
        Self::from_records_with(records, &WhitespaceTokenizer::new())
    }

    /// Build a table from records using a custom tokenizer.
    pub fn from_records_with(records: &[String], tokenizer: &dyn Tokenizer) -> Self {
        let corpus = records.join(" ");

        let mut counts: AHashMap<&str, u64> = AHashMap::new();
        for token in tokenizer.tokenize(&corpus) {
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut entries: Vec<FrequencyEntry> = counts
            .into_iter()
            .map(|(word, frequency)| FrequencyEntry::new(word, frequency))
            .collect();
        entries.sort_unstable_by(|a, b| a.word.cmp(&b.word));

        FrequencyTable { entries }
    }

    /// Get the entries, sorted ascending by word.
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Consume the table and return its entries.
    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        self.entries
    }

    /// Iterate over the entries in word order.
    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    /// Get the number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all frequencies, equal to the number of tokens in the corpus.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.frequency).sum()
    }

    /// Look up the frequency of a word.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.entries
            .binary_search_by(|entry| entry.word.as_str().cmp(word))
            .ok()
            .map(|index| self.entries[index].frequency)
    }

    /// Get the `n` most frequent entries.
    ///
    /// Entries are ordered by descending frequency; equal frequencies keep
    /// ascending word order.
    pub fn most_common(&self, n: usize) -> Vec<FrequencyEntry> {
        let mut entries = self.entries.clone();
        // Stable sort preserves the word order among ties.
        entries.sort_by_key(|entry| Reverse(entry.frequency));
        entries.truncate(n);
        entries
    }

    /// Write the table as delimited text with a header row.
    pub fn write_delimited<W: Write>(
        &self,
        writer: &mut W,
        delimiter: char,
        headers: &ColumnHeaders,
    ) -> Result<()> {
        write_delimited_entries(writer, &self.entries, delimiter, headers)
    }
}

/// Write entries as delimited text with a header row.
pub fn write_delimited_entries<W: Write>(
    writer: &mut W,
    entries: &[FrequencyEntry],
    delimiter: char,
    headers: &ColumnHeaders,
) -> Result<()> {
    writeln!(writer, "{}{delimiter}{}", headers.word, headers.frequency)?;
    for entry in entries {
        writeln!(writer, "{}{delimiter}{}", entry.word, entry.frequency)?;
    }
    Ok(())
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
