//! Pipeline that composes the normalization stages.
//!
//! The pipeline applies its stages in a fixed order:
//!
//! ```text
//! Raw records → Normalizer → Cleaner → StopwordFilter → LemmaFilter → Canonical records
//! ```
//!
//! Normalizing first lets the cleaner and the stopword set see accent-free,
//! upper-case text; cleaning before stopword removal leaves punctuation-free
//! tokens for the set lookup; removing stopwords before lemmatization keeps
//! function words away from the lemmatizer.
//!
//! Both collaborators, the stopword set and the lemmatizer, must be supplied
//! to the builder. A missing collaborator fails at [`PipelineBuilder::build`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use palabras::analysis::lemmatizer::IdentityLemmatizer;
//! use palabras::analysis::pipeline::Pipeline;
//! use palabras::analysis::stage::StopwordSet;
//!
//! let pipeline = Pipeline::builder()
//!     .stopwords(Arc::new(StopwordSet::from_words(["el"])))
//!     .lemmatizer(Arc::new(IdentityLemmatizer::new()))
//!     .build()
//!     .unwrap();
//!
//! let records = vec!["Árbol, el PERRO corre.".to_string()];
//! assert_eq!(pipeline.run(&records), vec!["ARBOL PERRO CORRE"]);
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::stage::{Cleaner, LemmaFilter, Normalizer, Stage, StopwordFilter, StopwordSet};
use crate::error::{PalabrasError, Result};
use crate::frequency::FrequencyTable;

/// Identifies a stage of the pipeline, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Normalize,
    Clean,
    RemoveStopwords,
    Lemmatize,
}

impl StageKind {
    /// All stages in execution order.
    pub const ALL: [StageKind; 4] = [
        StageKind::Normalize,
        StageKind::Clean,
        StageKind::RemoveStopwords,
        StageKind::Lemmatize,
    ];

    /// Get the name of this stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Normalize => "normalize",
            StageKind::Clean => "clean",
            StageKind::RemoveStopwords => "stopwords",
            StageKind::Lemmatize => "lemmatize",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-stage statistics of a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStats {
    pub stage: StageKind,
    /// Number of records that were empty after this stage.
    pub empty_records: usize,
}

/// Output of a pipeline run with its statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Final records, positionally aligned with the input.
    pub records: Vec<String>,

    /// Statistics for every stage that ran, in execution order.
    pub stages: Vec<StageStats>,

    /// Rows the lemmatizer failed on (degraded to empty strings).
    pub failed_rows: Vec<usize>,
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    stopwords: Option<Arc<StopwordSet>>,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    cleaner: Option<Cleaner>,
    parallel: bool,
}

impl PipelineBuilder {
    /// Create a builder with no collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stopword set.
    pub fn stopwords(mut self, stopwords: Arc<StopwordSet>) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    /// Set the lemmatization service.
    pub fn lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Replace the default cleaner.
    pub fn cleaner(mut self, cleaner: Cleaner) -> Self {
        self.cleaner = Some(cleaner);
        self
    }

    /// Run every stage on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the pipeline.
    ///
    /// Fails with [`PalabrasError::Configuration`] naming the first missing
    /// collaborator.
    pub fn build(self) -> Result<Pipeline> {
        let stopwords = self
            .stopwords
            .ok_or_else(|| PalabrasError::missing_collaborator("stopword set"))?;
        let lemmatizer = self
            .lemmatizer
            .ok_or_else(|| PalabrasError::missing_collaborator("lemmatizer"))?;
        let cleaner = match self.cleaner {
            Some(cleaner) => cleaner,
            None => Cleaner::new()?,
        };

        Ok(Pipeline {
            normalizer: Normalizer::new(),
            cleaner,
            stopword_filter: StopwordFilter::new(stopwords),
            lemma_filter: LemmaFilter::new(lemmatizer),
            parallel: self.parallel,
        })
    }
}

/// The normalization pipeline.
///
/// Read-only once built; a single pipeline can serve many runs, including
/// concurrent runs on disjoint inputs.
#[derive(Clone)]
pub struct Pipeline {
    normalizer: Normalizer,
    cleaner: Cleaner,
    stopword_filter: StopwordFilter,
    lemma_filter: LemmaFilter,
    parallel: bool,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Get the normalizer stage.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Get the cleaner stage.
    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    /// Get the stopword filter stage.
    pub fn stopword_filter(&self) -> &StopwordFilter {
        &self.stopword_filter
    }

    /// Get the lemmatization stage.
    pub fn lemma_filter(&self) -> &LemmaFilter {
        &self.lemma_filter
    }

    /// Check whether stages run on the rayon thread pool.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Get the stage for the given kind.
    pub fn stage(&self, kind: StageKind) -> &dyn Stage {
        match kind {
            StageKind::Normalize => &self.normalizer,
            StageKind::Clean => &self.cleaner,
            StageKind::RemoveStopwords => &self.stopword_filter,
            StageKind::Lemmatize => &self.lemma_filter,
        }
    }

    /// Run all four stages.
    pub fn run(&self, records: &[String]) -> Vec<String> {
        self.run_through(records, StageKind::Lemmatize)
    }

    /// Run the stages up to and including `last`.
    pub fn run_through(&self, records: &[String], last: StageKind) -> Vec<String> {
        self.execute(records, last).records
    }

    /// Run all four stages and collect per-stage statistics.
    pub fn run_report(&self, records: &[String]) -> PipelineReport {
        self.execute(records, StageKind::Lemmatize)
    }

    /// Run all four stages and build the frequency table of the output.
    pub fn dictionary(&self, records: &[String]) -> FrequencyTable {
        FrequencyTable::from_records(&self.run(records))
    }

    fn execute(&self, records: &[String], last: StageKind) -> PipelineReport {
        let mut report = PipelineReport {
            records: records.to_vec(),
            ..Default::default()
        };

        for kind in StageKind::ALL.into_iter().filter(|kind| *kind <= last) {
            report.records = match kind {
                StageKind::Lemmatize => {
                    let batch = self
                        .lemma_filter
                        .apply_with_report(&report.records, self.parallel);
                    report.failed_rows = batch.failed_rows;
                    batch.records
                }
                _ => {
                    let stage = self.stage(kind);
                    if self.parallel {
                        stage.apply_parallel(&report.records)
                    } else {
                        stage.apply(&report.records)
                    }
                }
            };

            let empty_records = report.records.iter().filter(|r| r.is_empty()).count();
            debug!(
                "stage '{}' processed {} records ({} empty)",
                kind,
                report.records.len(),
                empty_records
            );
            report.stages.push(StageStats {
                stage: kind,
                empty_records,
            });
        }

        report
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "stages",
                &StageKind::ALL
                    .iter()
                    .map(|kind| self.stage(*kind).name())
                    .collect::<Vec<_>>(),
            )
            .field("stopwords", &self.stopword_filter.stopwords().len())
            .field("lemmatizer", &self.lemma_filter.lemmatizer().name())
            .field("parallel", &self.parallel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lemmatizer::{DictionaryLemmatizer, IdentityLemmatizer};

    fn pipeline(stopwords: &[&str]) -> Pipeline {
        Pipeline::builder()
            .stopwords(Arc::new(StopwordSet::from_words(stopwords)))
            .lemmatizer(Arc::new(IdentityLemmatizer::new()))
            .build()
            .unwrap()
    }

    fn records(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_pipeline() {
        let pipeline = pipeline(&["el"]);
        let input = records(&["Árbol, el PERRO corre."]);

        assert_eq!(
            pipeline.run_through(&input, StageKind::Normalize),
            vec!["ARBOL, EL PERRO CORRE."]
        );
        assert_eq!(
            pipeline.run_through(&input, StageKind::Clean),
            vec!["ARBOL EL PERRO CORRE"]
        );
        assert_eq!(
            pipeline.run_through(&input, StageKind::RemoveStopwords),
            vec!["ARBOL PERRO CORRE"]
        );
        assert_eq!(pipeline.run(&input), vec!["ARBOL PERRO CORRE"]);
    }

    #[test]
    fn test_missing_stopwords() {
        let error = Pipeline::builder()
            .lemmatizer(Arc::new(IdentityLemmatizer::new()))
            .build()
            .unwrap_err();

        assert!(matches!(error, PalabrasError::Configuration(_)));
        assert!(error.to_string().contains("stopword set"));
    }

    #[test]
    fn test_missing_lemmatizer() {
        let error = Pipeline::builder()
            .stopwords(Arc::new(StopwordSet::spanish()))
            .build()
            .unwrap_err();

        assert!(error.to_string().contains("lemmatizer"));
    }

    #[test]
    fn test_stopwords_match_after_normalization() {
        // "más" only matches because the record is normalized before lookup.
        let pipeline = pipeline(&["más"]);
        assert_eq!(pipeline.run(&records(&["Más café"])), vec!["CAFE"]);
    }

    #[test]
    fn test_lemmatizer_sees_filtered_tokens() {
        let pipeline = Pipeline::builder()
            .stopwords(Arc::new(StopwordSet::spanish()))
            .lemmatizer(Arc::new(DictionaryLemmatizer::from_pairs([
                ("corriendo", "correr"),
                ("perros", "perro"),
            ])))
            .build()
            .unwrap();

        assert_eq!(
            pipeline.run(&records(&["Los perros están corriendo"])),
            vec!["PERRO CORRER"]
        );
    }

    #[test]
    fn test_report() {
        let pipeline = pipeline(&["el", "la", "de"]);
        let report = pipeline.run_report(&records(&["el la de", "123", "casa"]));

        assert_eq!(report.records, vec!["", "", "CASA"]);
        assert_eq!(report.stages.len(), 4);
        assert_eq!(report.stages[0].empty_records, 0);
        assert_eq!(report.stages[1].stage, StageKind::Clean);
        assert_eq!(report.stages[1].empty_records, 1);
        assert_eq!(report.stages[2].empty_records, 2);
        assert!(report.failed_rows.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = pipeline(&["el"]);
        let parallel = Pipeline::builder()
            .stopwords(Arc::new(StopwordSet::from_words(["el"])))
            .lemmatizer(Arc::new(IdentityLemmatizer::new()))
            .parallel(true)
            .build()
            .unwrap();
        let input: Vec<String> = (0..200)
            .map(|i| format!("El registro número {i}, #{i}"))
            .collect();

        assert!(parallel.is_parallel());
        assert_eq!(parallel.run(&input), sequential.run(&input));
    }

    #[test]
    fn test_dictionary() {
        let pipeline = pipeline(&["el"]);
        let table = pipeline.dictionary(&records(&["el perro", "El PERRO y el gato"]));

        assert_eq!(table.frequency("PERRO"), Some(2));
        assert_eq!(table.frequency("GATO"), Some(1));
        assert_eq!(table.frequency("EL"), None);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_empty_input() {
        let pipeline = pipeline(&["el"]);

        assert!(pipeline.run(&[]).is_empty());
        assert_eq!(pipeline.run(&records(&[""])), vec![""]);
        assert!(pipeline.dictionary(&records(&["", ""])).is_empty());
    }
}
