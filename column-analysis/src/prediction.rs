//! Regression predictions ranked by how far they miss.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::analyzers::{parse_numeric, AnalyzerResult, ColumnIter, Row, StatValue};

/// Column titles of an outlier table, matching [`Prediction::table_row`].
pub const TABLE_COLUMNS: [&str; 4] = ["Outlier", "Predicted", "Actual", "Error"];

/// Expected and predicted value of one data point.
///
/// Predictions order by absolute error, largest first, then by id.
///
/// # Example
///
/// ```rust
/// use column_analysis::prediction::Prediction;
///
/// let mut list = vec![
///     Prediction::new("b", 1.0, 1.5),
///     Prediction::new("a", 2.0, 4.0),
///     Prediction::new("c", 3.0, 2.5),
/// ];
/// list.sort();
///
/// let ids: Vec<_> = list.iter().map(|p| p.id()).collect();
/// assert_eq!(ids, ["a", "b", "c"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    id: String,
    expected: f64,
    predicted: f64,
    abs_error: f64,
}

impl Prediction {
    pub fn new(id: impl Into<String>, expected: f64, predicted: f64) -> Self {
        Self {
            id: id.into(),
            expected,
            predicted,
            abs_error: (expected - predicted).abs(),
        }
    }

    /// Builds predictions from three columns of `rows`.
    ///
    /// Rows whose expected or predicted value does not parse are skipped.
    pub fn from_columns<R: Row>(
        rows: &[R],
        id: usize,
        expected: usize,
        predicted: usize,
    ) -> AnalyzerResult<Vec<Self>> {
        // Validates the row lengths for all three indices up front.
        ColumnIter::new(rows, id, expected.max(predicted))?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let id = row.field(id)?;
                let expected = parse_numeric(row.field(expected)?)?;
                let predicted = parse_numeric(row.field(predicted)?)?;
                Some(Self::new(id, expected, predicted))
            })
            .collect())
    }

    /// Returns the `n` worst predictions, worst first.
    pub fn outliers(mut predictions: Vec<Self>, n: usize) -> Vec<Self> {
        predictions.sort();
        predictions.truncate(n);
        predictions
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expected(&self) -> f64 {
        self.expected
    }

    pub fn predicted(&self) -> f64 {
        self.predicted
    }

    pub fn abs_error(&self) -> f64 {
        self.abs_error
    }

    /// Expected value formatted as `%14.6f`.
    pub fn display_actual(&self) -> String {
        StatValue::Float(self.expected).to_string()
    }

    /// Predicted value formatted as `%14.6f`.
    pub fn display_predicted(&self) -> String {
        StatValue::Float(self.predicted).to_string()
    }

    /// Absolute error formatted as `%14.6f`.
    pub fn display_error(&self) -> String {
        StatValue::Float(self.abs_error).to_string()
    }

    /// Cells for the [`TABLE_COLUMNS`] of an outlier table.
    pub fn table_row(&self) -> [String; 4] {
        [
            self.id.clone(),
            self.display_predicted(),
            self.display_actual(),
            self.display_error(),
        ]
    }
}

impl PartialEq for Prediction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Prediction {}

impl PartialOrd for Prediction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prediction {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .abs_error
            .total_cmp(&self.abs_error)
            .then_with(|| self.id.cmp(&other.id))
    }
}
