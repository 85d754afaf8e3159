//! Pipeline configuration.
//!
//! [`PipelineConfig`] describes where a pipeline gets its collaborators from
//! and how it runs. It is usually loaded from a JSON file; every field has a
//! default, so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "use_default_stopwords": true,
//!   "stopwords_file": "stopwords.txt",
//!   "extra_stopwords": ["sr", "sra"],
//!   "lemmatizer": { "kind": "dictionary", "path": "lemmas.tsv" },
//!   "extra_punctuation": "€§",
//!   "missing_policy": "empty",
//!   "parallel": true,
//!   "headers": { "word": "PALABRA", "frequency": "FRECUENCIA" }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::lemmatizer::{
    DictionaryLemmatizer, IdentityLemmatizer, Lemmatizer, SuffixLemmatizer,
};
use crate::analysis::pipeline::Pipeline;
use crate::analysis::stage::{Cleaner, StopwordSet};
use crate::column::MissingPolicy;
use crate::error::{PalabrasError, Result};
use crate::frequency::ColumnHeaders;

/// Which lemmatization service a pipeline uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LemmatizerConfig {
    /// Tokens are their own lemmas.
    #[default]
    Identity,
    /// Rule-based suffix rewriting, with optional custom rules.
    Suffix {
        #[serde(default)]
        rules: Option<Vec<(String, String)>>,
    },
    /// Lookup table loaded from a `form<TAB>lemma` file.
    Dictionary { path: PathBuf },
}

impl LemmatizerConfig {
    /// Construct the configured lemmatizer.
    pub fn build(&self) -> Result<Arc<dyn Lemmatizer>> {
        let lemmatizer: Arc<dyn Lemmatizer> = match self {
            LemmatizerConfig::Identity => Arc::new(IdentityLemmatizer::new()),
            LemmatizerConfig::Suffix { rules: None } => Arc::new(SuffixLemmatizer::new()),
            LemmatizerConfig::Suffix { rules: Some(rules) } => {
                Arc::new(SuffixLemmatizer::with_rules(rules.iter().cloned())?)
            }
            LemmatizerConfig::Dictionary { path } => {
                let file = File::open(path).map_err(|e| {
                    PalabrasError::configuration(format!(
                        "cannot open lemma table {}: {e}",
                        path.display()
                    ))
                })?;
                let lemmatizer = DictionaryLemmatizer::from_reader(BufReader::new(file))?;
                info!(
                    "loaded {} lemma entries from {}",
                    lemmatizer.len(),
                    path.display()
                );
                Arc::new(lemmatizer)
            }
        };
        Ok(lemmatizer)
    }
}

/// Configuration for a normalization pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Start from the embedded Spanish stopword list.
    pub use_default_stopwords: bool,

    /// Additional stopwords, one per line.
    pub stopwords_file: Option<PathBuf>,

    /// Additional stopwords given inline.
    pub extra_stopwords: Vec<String>,

    /// Lemmatization service.
    pub lemmatizer: LemmatizerConfig,

    /// Characters removed by the cleaner on top of the default set.
    pub extra_punctuation: String,

    /// Handling of missing input cells.
    pub missing_policy: MissingPolicy,

    /// Run stages on the rayon thread pool.
    pub parallel: bool,

    /// Column names of the exported frequency table.
    pub headers: ColumnHeaders,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            use_default_stopwords: true,
            stopwords_file: None,
            extra_stopwords: Vec::new(),
            lemmatizer: LemmatizerConfig::default(),
            extra_punctuation: String::new(),
            missing_policy: MissingPolicy::default(),
            parallel: false,
            headers: ColumnHeaders::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Build the stopword set described by this configuration.
    pub fn build_stopwords(&self) -> Result<StopwordSet> {
        let mut stopwords = if self.use_default_stopwords {
            StopwordSet::spanish()
        } else {
            StopwordSet::new()
        };

        if let Some(path) = &self.stopwords_file {
            let file = File::open(path).map_err(|e| {
                PalabrasError::configuration(format!(
                    "cannot open stopword file {}: {e}",
                    path.display()
                ))
            })?;
            let loaded = StopwordSet::from_reader(BufReader::new(file))?;
            info!("loaded {} stopwords from {}", loaded.len(), path.display());
            stopwords = stopwords.with_words(loaded.iter());
        }

        Ok(stopwords.with_words(&self.extra_stopwords))
    }

    /// Build a pipeline from this configuration.
    pub fn build_pipeline(&self) -> Result<Pipeline> {
        let cleaner = Cleaner::new()?.with_extra_chars(self.extra_punctuation.chars());

        Pipeline::builder()
            .stopwords(Arc::new(self.build_stopwords()?))
            .lemmatizer(self.lemmatizer.build()?)
            .cleaner(cleaner)
            .parallel(self.parallel)
            .build()
    }
}
