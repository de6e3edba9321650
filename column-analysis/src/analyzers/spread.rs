//! Spread of a numeric column across the label classes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::column::{ColumnIter, Row};
use super::numeric::{finite_mean, is_binary, parse_numeric};
use super::traits::{AnalyzerState, ColumnAnalyzer};
use super::types::{AnalysisResult, ContinuousSpread, DiscreteSpread, LabelCounts, SpreadPoint};

/// Analyzer that relates a numeric column to the label column.
///
/// Rows whose value does not parse are skipped. If every parsed value is
/// exactly `0.0` or `1.0` the column is discrete and the result counts
/// present (`1.0`) and absent (`0.0`) values per label. Otherwise the mean of
/// all parsed values is computed and every `(label, value)` pair is placed in
/// the high series when `value > mean` and in the low series when
/// `value <= mean`.
///
/// # Example
///
/// ```rust
/// use column_analysis::analyzers::{ColumnAnalyzer, ColumnIter, LabelCounts, SpreadAnalyzer};
///
/// let rows = vec![vec!["1", "A"], vec!["0", "A"], vec!["1", "B"]];
/// let result = SpreadAnalyzer::new().analyze(ColumnIter::new(&rows, 1, 0).unwrap());
///
/// let spread = result.as_discrete_spread().unwrap();
/// assert_eq!(spread.get("A"), Some(LabelCounts::new(1, 1)));
/// assert_eq!(spread.get("B"), Some(LabelCounts::new(1, 0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpreadAnalyzer;

impl SpreadAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

/// Parsed values grouped by label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadState {
    /// Parsed values per label, in row order within each label.
    pub labels: BTreeMap<String, Vec<f64>>,
    /// False as soon as a value outside `{0.0, 1.0}` was seen.
    pub discrete: bool,
    /// Number of parsed values.
    pub count: u64,
    /// Number of rows whose value did not parse.
    pub skipped: u64,
}

impl Default for SpreadState {
    fn default() -> Self {
        Self {
            labels: BTreeMap::new(),
            discrete: true,
            count: 0,
            skipped: 0,
        }
    }
}

impl SpreadState {
    /// Records one parsed value for a label.
    pub fn record(&mut self, label: &str, value: f64) {
        self.labels.entry(label.to_string()).or_default().push(value);
        self.discrete &= is_binary(value);
        self.count += 1;
    }

    /// Mean of all parsed values, summed label by label.
    pub fn mean(&self) -> Option<f64> {
        finite_mean(self.labels.values().flatten().copied())
    }
}

impl AnalyzerState for SpreadState {
    fn merge(states: Vec<Self>) -> Self {
        states.into_iter().fold(SpreadState::default(), |mut acc, state| {
            for (label, values) in state.labels {
                acc.labels.entry(label).or_default().extend(values);
            }
            acc.discrete &= state.discrete;
            acc.count += state.count;
            acc.skipped += state.skipped;
            acc
        })
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl ColumnAnalyzer for SpreadAnalyzer {
    type State = SpreadState;

    #[instrument(skip_all, fields(analyzer = "spread", column = column.column_index()))]
    fn compute_state<R: Row>(&self, column: ColumnIter<'_, R>) -> Self::State {
        let mut state = SpreadState::default();
        for entry in column {
            match parse_numeric(entry.value) {
                Some(value) => state.record(entry.label, value),
                None => state.skipped += 1,
            }
        }
        debug!(
            parsed = state.count,
            skipped = state.skipped,
            labels = state.labels.len(),
            discrete = state.discrete,
            "Grouped column values by label"
        );
        state
    }

    fn compute_result_from_state(&self, state: &Self::State) -> AnalysisResult {
        let Some(mean) = state.mean() else {
            return AnalysisResult::NoData;
        };

        if state.discrete {
            let labels = state
                .labels
                .iter()
                .map(|(label, values)| {
                    let absent = values.iter().filter(|&&v| v == 0.0).count() as u64;
                    let present = values.len() as u64 - absent;
                    (label.clone(), LabelCounts::new(present, absent))
                })
                .collect();
            return AnalysisResult::DiscreteSpread(DiscreteSpread { labels });
        }

        let mut high = Vec::new();
        let mut low = Vec::new();
        for (label, values) in &state.labels {
            for &value in values {
                let point = SpreadPoint::new(label.clone(), value);
                if value > mean {
                    high.push(point);
                } else {
                    low.push(point);
                }
            }
        }
        debug!(mean, high = high.len(), low = low.len(), "Split values around the mean");

        AnalysisResult::ContinuousSpread(ContinuousSpread { mean, high, low })
    }

    fn name(&self) -> &str {
        "spread"
    }

    fn description(&self) -> &str {
        "Relates a numeric column to the label classes"
    }
}
