//! Error types for the palabras library.
//!
//! All fallible operations return [`PalabrasError`] through the [`Result`]
//! alias. Only configuration, input shape and I/O problems are fatal for a
//! run; a lemmatizer failure on a single record is degraded to an empty
//! record by the pipeline and never surfaces here.
//!
//! # Examples
//!
//! ```
//! use palabras::error::{PalabrasError, Result};
//!
//! fn build() -> Result<()> {
//!     Err(PalabrasError::configuration("stopword set was not supplied"))
//! }
//!
//! let error = build().unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "Configuration error: stopword set was not supplied"
//! );
//! ```

use std::io;

use thiserror::Error;

/// The main error type for palabras operations.
#[derive(Error, Debug)]
pub enum PalabrasError {
    /// I/O errors (reading input columns, stopword or lemma files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A cell of the input column is not a string where one is required
    #[error("Input shape error at row {row}: {message}")]
    InputShape { row: usize, message: String },

    /// The lemmatization service could not process a record
    #[error("External service error: {0}")]
    ExternalService(String),

    /// A pipeline collaborator is missing or a configuration value is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Analysis-related errors (pattern compilation, rule tables, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PalabrasError.
pub type Result<T> = std::result::Result<T, PalabrasError>;

impl PalabrasError {
    /// Create a new input shape error for the given row.
    pub fn input_shape<S: Into<String>>(row: usize, msg: S) -> Self {
        PalabrasError::InputShape {
            row,
            message: msg.into(),
        }
    }

    /// Create a new external service error.
    pub fn external_service<S: Into<String>>(msg: S) -> Self {
        PalabrasError::ExternalService(msg.into())
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        PalabrasError::Configuration(msg.into())
    }

    /// Create a new configuration error for a collaborator that was never supplied.
    pub fn missing_collaborator(name: &str) -> Self {
        PalabrasError::Configuration(format!(
            "{name} was not supplied before the pipeline was built"
        ))
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PalabrasError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PalabrasError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PalabrasError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PalabrasError::input_shape(3, "expected a string, found 42");
        assert_eq!(
            error.to_string(),
            "Input shape error at row 3: expected a string, found 42"
        );

        let error = PalabrasError::external_service("model not loaded");
        assert_eq!(error.to_string(), "External service error: model not loaded");

        let error = PalabrasError::missing_collaborator("lemmatizer");
        assert_eq!(
            error.to_string(),
            "Configuration error: lemmatizer was not supplied before the pipeline was built"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = PalabrasError::from(io_error);

        match error {
            PalabrasError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
