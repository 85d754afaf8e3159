//! Input columns.
//!
//! A [`TextColumn`] is the raw column a pipeline run starts from: one cell
//! per record, in row order, where a cell may be missing. Before the pipeline
//! runs, the column is resolved into plain strings according to a
//! [`MissingPolicy`]. Positions are never dropped, so row `i` of the result
//! always corresponds to row `i` of the source.
//!
//! # Examples
//!
//! ```
//! use palabras::column::{MissingPolicy, TextColumn};
//!
//! let column = TextColumn::new(vec![Some("Árbol".to_string()), None]);
//!
//! assert_eq!(column.resolve(MissingPolicy::Empty).unwrap(), vec!["Árbol", ""]);
//! assert!(column.resolve(MissingPolicy::Reject).is_err());
//! ```

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PalabrasError, Result};

/// What to do with a missing cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Treat the cell as an empty string.
    #[default]
    Empty,
    /// Fail with an input shape error naming the row.
    Reject,
}

/// A column of optional text cells in row order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextColumn {
    cells: Vec<Option<String>>,
}

impl TextColumn {
    /// Create a column from optional cells.
    pub fn new(cells: Vec<Option<String>>) -> Self {
        TextColumn { cells }
    }

    /// Create a column where every cell is present.
    pub fn from_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(values.into_iter().map(|s| Some(s.into())).collect())
    }

    /// Read one record per line.
    ///
    /// Every line is a present cell, including blank ones.
    pub fn from_lines<R: BufRead>(reader: R) -> Result<Self> {
        let cells = reader
            .lines()
            .map(|line| line.map(Some))
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self::new(cells))
    }

    /// Build a column from a JSON array of cells.
    ///
    /// Strings are cells and `null` is a missing cell. Any other value is an
    /// input shape error naming its row.
    pub fn from_json_values(values: &[Value]) -> Result<Self> {
        let cells = values
            .iter()
            .enumerate()
            .map(|(row, value)| Self::cell_from_value(row, value))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(cells))
    }

    /// Extract the named field of every JSON object in `rows`.
    ///
    /// An object without the field contributes a missing cell. A row that is
    /// not an object, or a field that is neither a string nor `null`, is an
    /// input shape error.
    pub fn from_json_records(rows: &[Value], column: &str) -> Result<Self> {
        let cells = rows
            .iter()
            .enumerate()
            .map(|(row, value)| match value {
                Value::Object(fields) => match fields.get(column) {
                    Some(field) => Self::cell_from_value(row, field),
                    None => Ok(None),
                },
                other => Err(PalabrasError::input_shape(
                    row,
                    format!("expected an object with field '{column}', found {other}"),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(cells))
    }

    fn cell_from_value(row: usize, value: &Value) -> Result<Option<String>> {
        match value {
            Value::String(text) => Ok(Some(text.clone())),
            Value::Null => Ok(None),
            other => Err(PalabrasError::input_shape(
                row,
                format!("expected a string or null, found {other}"),
            )),
        }
    }

    /// Get the cells.
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Count the missing cells.
    pub fn missing(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Resolve the column into strings.
    pub fn resolve(&self, policy: MissingPolicy) -> Result<Vec<String>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match (cell, policy) {
                (Some(text), _) => Ok(text.clone()),
                (None, MissingPolicy::Empty) => Ok(String::new()),
                (None, MissingPolicy::Reject) => {
                    Err(PalabrasError::input_shape(row, "missing cell"))
                }
            })
            .collect()
    }
}

impl From<Vec<String>> for TextColumn {
    fn from(values: Vec<String>) -> Self {
        Self::from_strings(values)
    }
}
