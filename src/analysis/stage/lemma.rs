//! Lemmatization stage.
//!
//! Wraps a [`Lemmatizer`] service and turns its output into canonical
//! records: every lemma is upper-cased and the lemmas are joined with a single
//! space. A record the service cannot process becomes an empty string and a
//! warning is logged; the rest of the batch is unaffected.

use std::sync::Arc;

use log::warn;
use rayon::prelude::*;

use super::Stage;
use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// Output of a lemmatization batch together with its degraded records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaBatch {
    /// Lemmatized records, positionally aligned with the input.
    pub records: Vec<String>,

    /// Positions whose record the service failed to process.
    pub failed_rows: Vec<usize>,
}

/// A stage that replaces each token with its lemma.
#[derive(Clone)]
pub struct LemmaFilter {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl LemmaFilter {
    /// Create a new lemma filter over a shared lemmatization service.
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }

    /// Get the lemmatizer used by this stage.
    pub fn lemmatizer(&self) -> &Arc<dyn Lemmatizer> {
        &self.lemmatizer
    }

    /// Lemmatize a single record, surfacing service errors.
    ///
    /// Empty records short-circuit to an empty string without calling the
    /// service.
    pub fn try_process(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let lemmas = self.lemmatizer.lemmas(text)?;
        let upper: Vec<String> = lemmas.iter().map(|lemma| lemma.to_uppercase()).collect();

        // A lemma may itself contain whitespace; re-tokenize to keep single spaces.
        Ok(WhitespaceTokenizer::join(
            upper.iter().flat_map(|lemma| lemma.split_whitespace()),
        ))
    }

    /// Apply this stage to every record and report which rows were degraded.
    pub fn apply_with_report(&self, records: &[String], parallel: bool) -> LemmaBatch {
        let results: Vec<Result<String>> = if parallel {
            records.par_iter().map(|record| self.try_process(record)).collect()
        } else {
            records.iter().map(|record| self.try_process(record)).collect()
        };

        let mut batch = LemmaBatch {
            records: Vec::with_capacity(results.len()),
            failed_rows: Vec::new(),
        };
        for (row, result) in results.into_iter().enumerate() {
            match result {
                Ok(record) => batch.records.push(record),
                Err(e) => {
                    warn!(
                        "lemmatizer '{}' failed on row {row} {:?}: {e}",
                        self.lemmatizer.name(),
                        records[row]
                    );
                    batch.failed_rows.push(row);
                    batch.records.push(String::new());
                }
            }
        }
        batch
    }
}

impl Stage for LemmaFilter {
    fn process(&self, text: &str) -> String {
        self.try_process(text).unwrap_or_else(|e| {
            warn!(
                "lemmatizer '{}' failed on {text:?}: {e}",
                self.lemmatizer.name()
            );
            String::new()
        })
    }

    fn name(&self) -> &'static str {
        "lemmatize"
    }
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}
