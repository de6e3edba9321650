//! In-memory tabular data handed to the analyzers.

use serde::{Deserialize, Serialize};

use crate::analyzers::{AnalyzerError, AnalyzerResult};

/// Rows of string fields, optionally with header names.
///
/// Rows are not required to have the same number of fields; a row that is
/// too short for an analysis is reported when that analysis runs.
///
/// # Example
///
/// ```rust
/// use column_analysis::dataset::Dataset;
///
/// let mut data = Dataset::with_headers(vec!["width".into(), "class".into()]);
/// data.push_row(vec!["1.5".into(), "setosa".into()]);
///
/// assert_eq!(data.len(), 1);
/// assert_eq!(data.column_index("class").unwrap(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Creates a dataset without header names.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: Vec::new(),
            rows,
        }
    }

    /// Creates an empty dataset with the given header names.
    pub fn with_headers(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Replaces the rows, keeping the headers.
    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Returns the position of the header named `name` (exact match).
    pub fn column_index(&self, name: &str) -> AnalyzerResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| AnalyzerError::column_not_found(name))
    }

    /// Resolves a column given either by header name or by zero-based index.
    ///
    /// A header name takes precedence over an index, so a column literally
    /// named `"2"` is found by name.
    pub fn resolve_column(&self, spec: &str) -> AnalyzerResult<usize> {
        if let Ok(index) = self.column_index(spec) {
            return Ok(index);
        }
        spec.trim()
            .parse::<usize>()
            .map_err(|_| AnalyzerError::column_not_found(spec))
    }

    /// Returns the display name of a column: its header, or `column <index>`.
    pub fn column_name(&self, index: usize) -> String {
        self.headers
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("column {index}"))
    }
}

impl From<Vec<Vec<String>>> for Dataset {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
