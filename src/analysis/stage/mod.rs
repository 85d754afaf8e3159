//! Record-wise text transformation stages.
//!
//! A stage maps one record to one record. Applied to a batch it produces a
//! new vector of the same length and order; nothing is dropped, a record that
//! loses all of its content becomes an empty string in its position.
//!
//! # Available Stages
//!
//! - [`normalize::Normalizer`] - Upper-cases and strips acute, grave and circumflex accents
//! - [`clean::Cleaner`] - Removes digits and punctuation
//! - [`stop::StopwordFilter`] - Removes stopwords
//! - [`lemma::LemmaFilter`] - Replaces tokens with their lemmas
//!
//! # Examples
//!
//! ```
//! use palabras::analysis::stage::Stage;
//! use palabras::analysis::stage::normalize::Normalizer;
//!
//! let normalizer = Normalizer::new();
//! let records = vec!["árbol  verde".to_string(), "Canción".to_string()];
//!
//! assert_eq!(normalizer.apply(&records), vec!["ARBOL VERDE", "CANCION"]);
//! ```

use rayon::prelude::*;

/// Trait for stages that transform a record into a new record.
///
/// The trait requires `Send + Sync` so a stage can be shared between runs and
/// applied to disjoint records from several threads.
pub trait Stage: Send + Sync {
    /// Transform a single record.
    fn process(&self, text: &str) -> String;

    /// Get the name of this stage (for logging and configuration).
    fn name(&self) -> &'static str;

    /// Apply this stage to every record, preserving length and order.
    fn apply(&self, records: &[String]) -> Vec<String> {
        records.iter().map(|record| self.process(record)).collect()
    }

    /// Apply this stage to every record on the rayon thread pool.
    ///
    /// Output position `i` always holds the transformation of input position `i`.
    fn apply_parallel(&self, records: &[String]) -> Vec<String> {
        records.par_iter().map(|record| self.process(record)).collect()
    }
}

pub mod clean;
pub mod lemma;
pub mod normalize;
pub mod stop;

pub use clean::Cleaner;
pub use lemma::LemmaFilter;
pub use normalize::Normalizer;
pub use stop::{StopwordFilter, StopwordSet};
