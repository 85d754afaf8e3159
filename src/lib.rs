//! # Palabras
//!
//! Normalization of Spanish free-text columns into a canonical vocabulary and
//! a sorted word frequency dictionary.
//!
//! ## Features
//!
//! - Normalizer, Cleaner, StopwordFilter and Lemmatizer stages usable standalone
//! - Fixed-order pipeline with order-preserving parallel execution
//! - Pluggable lemmatization service behind a narrow trait
//! - Frequency tables with tabular and JSON export

pub mod analysis;
pub mod cli;
pub mod column;
pub mod config;
pub mod error;
pub mod frequency;

pub mod prelude {
    pub use crate::analysis::lemmatizer::{
        DictionaryLemmatizer, IdentityLemmatizer, Lemmatizer, SuffixLemmatizer,
    };
    pub use crate::analysis::pipeline::{Pipeline, PipelineBuilder, StageKind};
    pub use crate::analysis::stage::{
        Cleaner, LemmaFilter, Normalizer, Stage, StopwordFilter, StopwordSet,
    };
    pub use crate::column::{MissingPolicy, TextColumn};
    pub use crate::error::{PalabrasError, Result};
    pub use crate::frequency::{ColumnHeaders, FrequencyEntry, FrequencyTable};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
