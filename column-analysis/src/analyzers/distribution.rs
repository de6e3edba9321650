//! Frequency distribution of the raw values in a column.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

use super::column::{ColumnIter, Row};
use super::errors::{AnalyzerError, AnalyzerResult};
use super::traits::{AnalyzerState, ColumnAnalyzer};
use super::types::{AnalysisResult, Category, FrequencyDistribution};

/// Label of the synthetic category that collects rare values.
pub const DEFAULT_OTHERS_LABEL: &str = "others (<1%)";

/// Values occurring in at most `total_rows / DEFAULT_FOLD_DIVISOR` rows are
/// folded into the others category.
pub const DEFAULT_FOLD_DIVISOR: u64 = 100;

/// Order of the surviving categories in a [`FrequencyDistribution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    /// Descending count, ties broken by ascending category value.
    #[default]
    CountDescending,
    /// Ascending category value.
    Alphabetical,
}

impl CategoryOrder {
    fn sort(self, categories: &mut [Category]) {
        match self {
            CategoryOrder::CountDescending => categories
                .sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name))),
            CategoryOrder::Alphabetical => categories.sort_unstable_by(|a, b| a.name.cmp(&b.name)),
        }
    }
}

/// Analyzer that counts how often each raw value appears in a column.
///
/// Categories whose count is at most `total_rows / fold_divisor` (integer
/// division) are summed into a single others category. With the default
/// divisor of 100 nothing is folded for datasets under 100 rows. The label
/// column is ignored.
///
/// # Example
///
/// ```rust
/// use column_analysis::analyzers::{ColumnAnalyzer, ColumnIter, DistributionAnalyzer};
///
/// let rows = vec![vec!["red", "x"], vec!["blue", "y"], vec!["red", "z"]];
/// let result = DistributionAnalyzer::new().analyze(ColumnIter::new(&rows, 1, 0).unwrap());
///
/// let dist = result.as_distribution().unwrap();
/// assert_eq!(dist.categories[0].name, "red");
/// assert_eq!(dist.categories[0].count, 2);
/// assert!(dist.others.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DistributionAnalyzer {
    others_label: String,
    fold_divisor: u64,
    order: CategoryOrder,
}

impl Default for DistributionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributionAnalyzer {
    /// Creates an analyzer with the default folding rule and ordering.
    pub fn new() -> Self {
        Self {
            others_label: DEFAULT_OTHERS_LABEL.to_string(),
            fold_divisor: DEFAULT_FOLD_DIVISOR,
            order: CategoryOrder::default(),
        }
    }

    /// Sets the label of the folded category.
    pub fn with_others_label(mut self, label: impl Into<String>) -> Self {
        self.others_label = label.into();
        self
    }

    /// Sets the fold divisor. Must be at least 1.
    pub fn with_fold_divisor(mut self, divisor: u64) -> AnalyzerResult<Self> {
        if divisor == 0 {
            return Err(AnalyzerError::invalid_config(
                "fold divisor must be at least 1",
            ));
        }
        self.fold_divisor = divisor;
        Ok(self)
    }

    /// Sets the order of the emitted categories.
    pub fn with_order(mut self, order: CategoryOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the folding threshold for a dataset of `total_rows` rows.
    pub fn threshold(&self, total_rows: u64) -> u64 {
        total_rows / self.fold_divisor
    }
}

/// Raw value counts for the distribution analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionState {
    /// Occurrences of each distinct raw value.
    pub counts: HashMap<String, u64>,
    /// Number of rows visited.
    pub total_rows: u64,
}

impl AnalyzerState for DistributionState {
    fn merge(states: Vec<Self>) -> Self {
        states
            .into_iter()
            .fold(DistributionState::default(), |mut acc, state| {
                for (value, count) in state.counts {
                    *acc.counts.entry(value).or_insert(0) += count;
                }
                acc.total_rows += state.total_rows;
                acc
            })
    }

    fn is_empty(&self) -> bool {
        self.total_rows == 0
    }
}

impl ColumnAnalyzer for DistributionAnalyzer {
    type State = DistributionState;

    #[instrument(skip_all, fields(analyzer = "distribution", column = column.column_index()))]
    fn compute_state<R: Row>(&self, column: ColumnIter<'_, R>) -> Self::State {
        let mut state = DistributionState::default();
        for entry in column {
            *state.counts.entry(entry.value.to_string()).or_insert(0) += 1;
            state.total_rows += 1;
        }
        debug!(
            rows = state.total_rows,
            distinct = state.counts.len(),
            "Counted column values"
        );
        state
    }

    fn compute_result_from_state(&self, state: &Self::State) -> AnalysisResult {
        let threshold = self.threshold(state.total_rows);
        let mut categories = Vec::with_capacity(state.counts.len());
        let mut folded = 0u64;
        let mut folded_categories = 0usize;

        for (value, &count) in &state.counts {
            if count <= threshold {
                folded += count;
                folded_categories += 1;
            } else {
                categories.push(Category::new(value.clone(), count));
            }
        }
        self.order.sort(&mut categories);

        if folded_categories > 0 {
            debug!(
                threshold,
                folded_categories, folded, "Folded rare values into others"
            );
        }

        AnalysisResult::FrequencyDistribution(FrequencyDistribution {
            categories,
            others: (folded > 0).then(|| Category::new(self.others_label.clone(), folded)),
        })
    }

    fn name(&self) -> &str {
        "distribution"
    }

    fn description(&self) -> &str {
        "Counts the occurrences of each raw value, folding values under 1% of rows"
    }
}
