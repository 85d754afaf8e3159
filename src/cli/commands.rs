//! Command implementations for the palabras CLI.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use serde_json::Value;

use crate::analysis::pipeline::StageKind;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::column::{MissingPolicy, TextColumn};
use crate::config::{LemmatizerConfig, PipelineConfig};
use crate::error::{PalabrasError, Result};
use crate::frequency::{ColumnHeaders, FrequencyTable};

/// Execute a CLI command.
pub fn execute_command(args: PalabrasArgs) -> Result<()> {
    match &args.command {
        Command::Dictionary(dictionary_args) => build_dictionary(dictionary_args, &args),
        Command::Normalize(normalize_args) => normalize_records(normalize_args, &args),
    }
}

/// Run the full pipeline and output the frequency dictionary.
fn build_dictionary(args: &DictionaryArgs, cli_args: &PalabrasArgs) -> Result<()> {
    let config = load_config(&args.pipeline)?;
    let records = load_records(&args.pipeline, &config)?;
    let pipeline = config.build_pipeline()?;

    let start = Instant::now();
    let report = pipeline.run_report(&records);
    if !report.failed_rows.is_empty() {
        warn!(
            "{} records could not be lemmatized and were left empty",
            report.failed_rows.len()
        );
    }
    let table = FrequencyTable::from_records(&report.records);
    info!(
        "built dictionary of {} words ({} tokens) from {} records in {} ms",
        table.len(),
        table.total(),
        records.len(),
        start.elapsed().as_millis()
    );

    let headers = match args.headers {
        Some(language) => ColumnHeaders::from(language),
        None => config.headers.clone(),
    };
    let entries = match args.top {
        Some(n) => table.most_common(n),
        None => table.into_entries(),
    };

    let mut writer = open_output(args.output.as_deref())?;
    output_entries(&mut writer, &entries, &headers, cli_args)?;
    writer.flush()?;
    Ok(())
}

/// Run the pipeline up to a stage and output the records.
fn normalize_records(args: &NormalizeArgs, cli_args: &PalabrasArgs) -> Result<()> {
    let config = load_config(&args.pipeline)?;
    let records = load_records(&args.pipeline, &config)?;
    let pipeline = config.build_pipeline()?;

    let last = StageKind::from(args.until);
    let normalized = pipeline.run_through(&records, last);
    info!("normalized {} records through stage '{last}'", normalized.len());

    let mut writer = open_output(args.output.as_deref())?;
    output_records(&mut writer, &normalized, cli_args)?;
    writer.flush()?;
    Ok(())
}

/// Load the configuration file, if any, and apply command line overrides.
fn load_config(args: &PipelineArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            PipelineConfig::from_file(path)?
        }
        None => PipelineConfig::default(),
    };

    if args.no_default_stopwords {
        config.use_default_stopwords = false;
    }
    if let Some(path) = &args.stopwords {
        config.stopwords_file = Some(path.clone());
    }
    if args.reject_missing {
        config.missing_policy = MissingPolicy::Reject;
    }
    if args.parallel {
        config.parallel = true;
    }

    let lemmatizer = match (args.lemmatizer, &args.lemmas) {
        (None, None) => None,
        (Some(LemmatizerKind::Identity), None) => Some(LemmatizerConfig::Identity),
        (Some(LemmatizerKind::Suffix), None) => Some(LemmatizerConfig::Suffix { rules: None }),
        (None | Some(LemmatizerKind::Dictionary), Some(path)) => {
            Some(LemmatizerConfig::Dictionary { path: path.clone() })
        }
        (Some(LemmatizerKind::Dictionary), None) => {
            return Err(PalabrasError::configuration(
                "the dictionary lemmatizer needs a lemma table (--lemmas)",
            ));
        }
        (Some(kind), Some(_)) => {
            return Err(PalabrasError::configuration(format!(
                "--lemmas cannot be combined with the {kind:?} lemmatizer"
            )));
        }
    };
    if let Some(lemmatizer) = lemmatizer {
        config.lemmatizer = lemmatizer;
    }

    Ok(config)
}

/// Read the input column and resolve missing cells.
fn load_records(args: &PipelineArgs, config: &PipelineConfig) -> Result<Vec<String>> {
    let column = read_column(&args.input, args.column.as_deref())?;
    if column.missing() > 0 {
        info!("{} of {} cells are missing", column.missing(), column.len());
    }
    column.resolve(config.missing_policy)
}

/// Read a column from a JSON array or a line-oriented text file.
pub fn read_column(path: &Path, column: Option<&str>) -> Result<TextColumn> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if !is_json {
        if column.is_some() {
            return Err(PalabrasError::invalid_argument(
                "--column is only supported for JSON input",
            ));
        }
        return TextColumn::from_lines(BufReader::new(File::open(path)?));
    }

    let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let rows = value.as_array().ok_or_else(|| {
        PalabrasError::invalid_argument(format!("{} is not a JSON array", path.display()))
    })?;

    match column {
        Some(name) => TextColumn::from_json_records(rows, name),
        None => TextColumn::from_json_values(rows),
    }
}

/// Open the output file, or stdout when no path is given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_column_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "asuntos.txt", "Árbol caído\nPoste roto\n");

        let column = read_column(&path, None).unwrap();
        assert_eq!(column.len(), 2);
        assert!(read_column(&path, Some("ASUNTO")).is_err());
    }

    #[test]
    fn test_read_column_json() {
        let dir = TempDir::new().unwrap();
        let values = write_file(&dir, "values.json", r#"["uno", null]"#);
        let records = write_file(&dir, "records.json", r#"[{"ASUNTO": "uno"}, {"ID": 2}]"#);

        assert_eq!(read_column(&values, None).unwrap().missing(), 1);
        assert_eq!(read_column(&records, Some("ASUNTO")).unwrap().missing(), 1);
        assert!(read_column(&records, None).is_err());
    }

    #[test]
    fn test_dictionary_command() {
        let dir = TempDir::new().unwrap();
        let input = write_file(
            &dir,
            "asuntos.json",
            r#"[{"ASUNTO": "Árbol caído en la vía"}, {"ASUNTO": null}, {"ASUNTO": "ÁRBOL seco, 2 ramas"}]"#,
        );
        let output = dir.path().join("dictionary.tsv");

        let args = PalabrasArgs::parse_from([
            "palabras",
            "-f",
            "tsv",
            "dictionary",
            input.to_str().unwrap(),
            "--column",
            "ASUNTO",
            "--headers",
            "es",
            "-o",
            output.to_str().unwrap(),
        ]);
        execute_command(args).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "PALABRA\tFRECUENCIA\nARBOL\t2\nCAIDO\t1\nRAMAS\t1\nSECO\t1\nVIA\t1\n"
        );
    }

    #[test]
    fn test_dictionary_command_rejects_missing() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "values.json", r#"["uno", null]"#);

        let args = PalabrasArgs::parse_from([
            "palabras",
            "dictionary",
            input.to_str().unwrap(),
            "--reject-missing",
        ]);

        assert!(matches!(
            execute_command(args),
            Err(PalabrasError::InputShape { row: 1, .. })
        ));
    }

    #[test]
    fn test_normalize_command() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "asuntos.txt", "El perro, corre.\n\n");
        let output = dir.path().join("normalized.txt");

        let args = PalabrasArgs::parse_from([
            "palabras",
            "normalize",
            input.to_str().unwrap(),
            "--until",
            "clean",
            "-o",
            output.to_str().unwrap(),
        ]);
        execute_command(args).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "EL PERRO CORRE\n\n");
    }

    #[test]
    fn test_dictionary_lemmatizer_needs_table() {
        let args = PalabrasArgs::parse_from([
            "palabras",
            "dictionary",
            "in.txt",
            "--lemmatizer",
            "dictionary",
        ]);
        let Command::Dictionary(dictionary) = args.command else {
            panic!("expected dictionary command");
        };

        assert!(matches!(
            load_config(&dictionary.pipeline),
            Err(PalabrasError::Configuration(_))
        ));
    }
}
