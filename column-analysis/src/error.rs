//! Error types for the column analysis library.
//!
//! Analyzer-level failures live in [`AnalyzerError`]; everything around the
//! analyzers (loading data, configuration, background execution) is
//! reported through [`ColumnAnalysisError`].

use thiserror::Error;

use crate::analyzers::AnalyzerError;

/// The main error type for the library.
#[derive(Error, Debug)]
pub enum ColumnAnalysisError {
    /// Error raised by an analyzer or the runner.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// Error from data source operations.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV", "TSV")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed delimited input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A background task could not be joined.
    #[error("Background task failed: {0}")]
    Background(String),
}

/// A type alias for `Result<T, ColumnAnalysisError>`.
pub type Result<T> = std::result::Result<T, ColumnAnalysisError>;

impl ColumnAnalysisError {
    /// Creates a data source error without an underlying cause.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a data source error wrapping its cause.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<tokio::task::JoinError> for ColumnAnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Background(err.to_string())
    }
}
