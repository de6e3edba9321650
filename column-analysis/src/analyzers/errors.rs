//! Error types for the analyzer framework.

use thiserror::Error;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors that can occur during analyzer operations.
///
/// Unparsable numeric fields and empty columns are never errors; they are
/// reflected in the analysis result instead.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A row does not have enough fields for the requested column indices.
    #[error("Row {row} has {actual} fields but at least {required} are required")]
    RowTooShort {
        /// Zero-based position of the offending row.
        row: usize,
        /// Number of fields the analysis needs.
        required: usize,
        /// Number of fields the row actually has.
        actual: usize,
    },

    /// A named column could not be resolved to an index.
    #[error("Column '{column}' not found")]
    ColumnNotFound {
        /// The column name that was requested.
        column: String,
    },

    /// Invalid configuration or parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error raised while executing an analysis request.
    #[error("Execution error: {0}")]
    Execution(String),
}

impl AnalyzerError {
    /// Creates a short-row error.
    pub fn row_too_short(row: usize, required: usize, actual: usize) -> Self {
        Self::RowTooShort {
            row,
            required,
            actual,
        }
    }

    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}
