//! Command line argument parsing for the palabras CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::StageKind;
use crate::frequency::ColumnHeaders;

/// Palabras - Spanish text normalization and word frequency dictionaries
#[derive(Parser, Debug, Clone)]
#[command(name = "palabras")]
#[command(about = "Normalize Spanish text columns and build word frequency dictionaries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PalabrasArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PalabrasArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the full pipeline and print the word frequency dictionary
    Dictionary(DictionaryArgs),

    /// Run the pipeline (or a prefix of it) and print the normalized records
    Normalize(NormalizeArgs),
}

/// Arguments shared by every command that builds a pipeline
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Input file: JSON array (`.json`) or one record per line
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Field to read from each object of a JSON array of records
    #[arg(short, long, value_name = "NAME")]
    pub column: Option<String>,

    /// Pipeline configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "PALABRAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Additional stopword file, one word per line
    #[arg(short, long, value_name = "STOPWORDS_FILE")]
    pub stopwords: Option<PathBuf>,

    /// Do not load the embedded Spanish stopword list
    #[arg(long)]
    pub no_default_stopwords: bool,

    /// Lemmatization service
    #[arg(short, long, value_name = "KIND")]
    pub lemmatizer: Option<LemmatizerKind>,

    /// Lemma table (form<TAB>lemma); implies the dictionary lemmatizer
    #[arg(long, value_name = "LEMMAS_FILE")]
    pub lemmas: Option<PathBuf>,

    /// Fail on missing cells instead of treating them as empty
    #[arg(long)]
    pub reject_missing: bool,

    /// Process records in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for building a frequency dictionary
#[derive(Args, Debug, Clone)]
pub struct DictionaryArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Column header language of the table
    #[arg(long, value_name = "LANG")]
    pub headers: Option<HeaderLanguage>,

    /// Only print the N most frequent words
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Write the table to a file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for normalizing records
#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Last stage to run
    #[arg(short, long, default_value = "lemmatize")]
    pub until: StageArg,

    /// Write the records to a file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Lemmatization services selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LemmatizerKind {
    /// Tokens are their own lemmas
    Identity,
    /// Rule-based Spanish suffix rewriting
    Suffix,
    /// Lookup table given with --lemmas
    Dictionary,
}

/// Pipeline stages selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageArg {
    /// Case folding and accent removal
    Normalize,
    /// Digit and punctuation removal
    Clean,
    /// Stopword removal
    Stopwords,
    /// Lemmatization
    Lemmatize,
}

impl From<StageArg> for StageKind {
    fn from(stage: StageArg) -> Self {
        match stage {
            StageArg::Normalize => StageKind::Normalize,
            StageArg::Clean => StageKind::Clean,
            StageArg::Stopwords => StageKind::RemoveStopwords,
            StageArg::Lemmatize => StageKind::Lemmatize,
        }
    }
}

/// Column header languages
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderLanguage {
    /// WORD / FREQUENCY
    En,
    /// PALABRA / FRECUENCIA
    Es,
}

impl From<HeaderLanguage> for ColumnHeaders {
    fn from(language: HeaderLanguage) -> Self {
        match language {
            HeaderLanguage::En => ColumnHeaders::default(),
            HeaderLanguage::Es => ColumnHeaders::spanish(),
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// Tab-separated output
    Tsv,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        PalabrasArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_dictionary() {
        let args = PalabrasArgs::parse_from([
            "palabras",
            "-vv",
            "dictionary",
            "asuntos.json",
            "--column",
            "ASUNTO",
            "--headers",
            "es",
            "-n",
            "10",
            "-f",
            "tsv",
        ]);

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.output_format, OutputFormat::Tsv);
        match args.command {
            Command::Dictionary(dictionary) => {
                assert_eq!(dictionary.pipeline.column.as_deref(), Some("ASUNTO"));
                assert_eq!(dictionary.headers, Some(HeaderLanguage::Es));
                assert_eq!(dictionary.top, Some(10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_normalize() {
        let args =
            PalabrasArgs::parse_from(["palabras", "-q", "normalize", "in.txt", "-u", "clean"]);

        assert_eq!(args.verbosity(), 0);
        match args.command {
            Command::Normalize(normalize) => {
                assert_eq!(StageKind::from(normalize.until), StageKind::Clean);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
