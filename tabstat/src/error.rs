//! Error types for the tabstat statistics engine.
//!
//! All fallible operations in the crate return [`StatsError`] through the
//! [`Result`] alias. Individual malformed values never produce an error: they
//! are excluded from the computation that cannot use them.

use thiserror::Error;

/// The main error type for tabstat.
#[derive(Error, Debug)]
pub enum StatsError {
    /// The row set has zero rows. Classification and every summarizer are
    /// undefined on empty input.
    #[error("{operation} requires at least one row")]
    EmptyInput {
        /// Name of the operation that received the empty input
        operation: String,
    },

    /// A requested column is not part of the row set's schema.
    #[error("Column '{column}' not found in dataset")]
    MissingRequiredColumn { column: String },

    /// A histogram sample whose minimum equals its maximum.
    ///
    /// The histogrammer resolves this internally with a single-bin fallback;
    /// the variant exists so callers binning by hand can report it.
    #[error("Degenerate histogram range: every value equals {value}")]
    DegenerateRange { value: f64 },

    /// The summary has no populated section.
    #[error("Nothing to export: run an analysis first")]
    NothingToExport,

    /// Invalid analysis or logging configuration.
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while reading or writing delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error while rendering a report.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// A type alias for `Result<T, StatsError>`.
pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    /// Creates an empty-input error for the named operation.
    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Creates a missing-column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingRequiredColumn {
            column: column.into(),
        }
    }

    /// Creates a configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
