//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::{OutputFormat, PalabrasArgs};
use crate::error::Result;
use crate::frequency::{ColumnHeaders, FrequencyEntry, write_delimited_entries};

/// A normalized record and its source row.
#[derive(Debug, Serialize)]
pub struct NormalizedRecord<'a> {
    pub row: usize,
    pub text: &'a str,
}

/// Output frequency entries in the selected format.
pub fn output_entries<W: Write>(
    writer: &mut W,
    entries: &[FrequencyEntry],
    headers: &ColumnHeaders,
    args: &PalabrasArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_entries_human(writer, entries, headers),
        OutputFormat::Json => output_json(writer, &entries, args),
        OutputFormat::Tsv => write_delimited_entries(writer, entries, '\t', headers),
    }
}

/// Output normalized records in the selected format.
pub fn output_records<W: Write>(
    writer: &mut W,
    records: &[String],
    args: &PalabrasArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            for record in records {
                writeln!(writer, "{record}")?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let rows: Vec<NormalizedRecord> = records
                .iter()
                .enumerate()
                .map(|(row, text)| NormalizedRecord { row, text })
                .collect();
            output_json(writer, &rows, args)
        }
        OutputFormat::Tsv => {
            writeln!(writer, "ROW\tTEXT")?;
            for (row, record) in records.iter().enumerate() {
                writeln!(writer, "{row}\t{record}")?;
            }
            Ok(())
        }
    }
}

/// Output entries as an aligned table.
fn output_entries_human<W: Write>(
    writer: &mut W,
    entries: &[FrequencyEntry],
    headers: &ColumnHeaders,
) -> Result<()> {
    let word_width = entries
        .iter()
        .map(|entry| entry.word.chars().count())
        .chain(std::iter::once(headers.word.chars().count()))
        .max()
        .unwrap_or(0);
    let frequency_width = headers.frequency.chars().count();

    writeln!(
        writer,
        "{:<word_width$}  {:>frequency_width$}",
        headers.word, headers.frequency
    )?;
    for entry in entries {
        writeln!(
            writer,
            "{:<word_width$}  {:>frequency_width$}",
            entry.word, entry.frequency
        )?;
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    result: &T,
    args: &PalabrasArgs,
) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(writer, "{json}")?;
    Ok(())
}
