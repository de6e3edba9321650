//! Descriptive statistics over the numeric values of a column.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::column::{ColumnIter, Row};
use super::numeric::{finite_mean, parse_numeric};
use super::traits::{AnalyzerState, ColumnAnalyzer};
use super::types::{AnalysisResult, Statistics};

/// Below this sample variance the skewness is reported as zero.
const NEGLIGIBLE_VARIANCE: f64 = 1e-19;

/// Analyzer that computes count, min, median, mean, max, standard deviation
/// and skewness of a column.
///
/// Unparsable rows are skipped and the label column is ignored. The standard
/// deviation is the sample standard deviation (`n - 1` denominator, zero for a
/// single value). The skewness is the bias-corrected sample skewness
/// `n / ((n - 1)(n - 2)) * sum(((x - mean) / s)^3)`, which is undefined (NaN)
/// for fewer than three values.
///
/// # Example
///
/// ```rust
/// use column_analysis::analyzers::{ColumnAnalyzer, ColumnIter, StatisticsAnalyzer};
///
/// let rows: Vec<[&str; 2]> = ["1", "2", "3", "4", "5"].iter().map(|v| [*v, "x"]).collect();
/// let result = StatisticsAnalyzer::new().analyze(ColumnIter::new(&rows, 1, 0).unwrap());
///
/// let stats = result.as_statistics().unwrap();
/// assert_eq!(stats.count, 5);
/// assert_eq!(stats.median, Some(3.0));
/// assert_eq!(stats.mean, Some(3.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatisticsAnalyzer;

impl StatisticsAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

/// Parsed values of the column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsState {
    pub values: Vec<f64>,
    /// Number of rows whose value did not parse.
    pub skipped: u64,
}

impl AnalyzerState for StatisticsState {
    fn merge(states: Vec<Self>) -> Self {
        states
            .into_iter()
            .fold(StatisticsState::default(), |mut acc, state| {
                acc.values.extend(state.values);
                acc.skipped += state.skipped;
                acc
            })
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Estimates the `p`-th percentile (0 < p <= 100) of ascending `sorted`
/// values.
///
/// Uses the `p * (n + 1) / 100` position with linear interpolation between the
/// neighbouring order statistics, clamped to the minimum and maximum.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(p > 0.0 && p <= 100.0) {
        return None;
    }
    let pos = p * (n as f64 + 1.0) / 100.0;
    if pos < 1.0 {
        return Some(sorted[0]);
    }
    if pos >= n as f64 {
        return Some(sorted[n - 1]);
    }
    let lower_pos = pos.floor();
    let index = lower_pos as usize;
    let lower = sorted[index - 1];
    let upper = sorted[index];
    Some(lower + (pos - lower_pos) * (upper - lower))
}

fn describe(values: &[f64]) -> Statistics {
    if values.is_empty() {
        return Statistics::empty();
    }

    let n = values.len() as f64;
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let Some(mean) = finite_mean(values.iter().copied()) else {
        return Statistics::empty();
    };
    let squared_deviations: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    let variance = if values.len() > 1 {
        squared_deviations / (n - 1.0)
    } else {
        0.0
    };
    let std_dev = variance.sqrt();

    let skewness = if values.len() < 3 {
        f64::NAN
    } else if variance < NEGLIGIBLE_VARIANCE {
        0.0
    } else {
        let cubed: f64 = values
            .iter()
            .map(|x| ((x - mean) / std_dev).powi(3))
            .sum();
        n / ((n - 1.0) * (n - 2.0)) * cubed
    };

    Statistics {
        count: values.len() as u64,
        min: sorted.first().copied(),
        median: percentile(&sorted, 50.0),
        mean: Some(mean),
        max: sorted.last().copied(),
        std_dev: Some(std_dev),
        skewness: Some(skewness),
    }
}

impl ColumnAnalyzer for StatisticsAnalyzer {
    type State = StatisticsState;

    #[instrument(skip_all, fields(analyzer = "statistics", column = column.column_index()))]
    fn compute_state<R: Row>(&self, column: ColumnIter<'_, R>) -> Self::State {
        let mut state = StatisticsState::default();
        for entry in column {
            match parse_numeric(entry.value) {
                Some(value) => state.values.push(value),
                None => state.skipped += 1,
            }
        }
        debug!(
            parsed = state.values.len(),
            skipped = state.skipped,
            "Collected numeric values"
        );
        state
    }

    fn compute_result_from_state(&self, state: &Self::State) -> AnalysisResult {
        AnalysisResult::Statistics(describe(&state.values))
    }

    fn name(&self) -> &str {
        "statistics"
    }

    fn description(&self) -> &str {
        "Computes descriptive statistics of the numeric values of a column"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("statistic should be present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 50.0), Some(2.5));
        assert_eq!(percentile(&sorted, 25.0), Some(1.25));
        assert_eq!(percentile(&sorted, 10.0), Some(1.0));
        assert_eq!(percentile(&sorted, 100.0), Some(4.0));
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&sorted, 0.0), None);
    }

    #[test]
    fn test_describe_symmetric_sample() {
        let stats = describe(&[5.0, 3.0, 1.0, 4.0, 2.0]);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(5.0));
        assert_eq!(stats.median, Some(3.0));
        assert_close(stats.mean, 3.0);
        assert_close(stats.std_dev, 2.5f64.sqrt());
        assert_close(stats.skewness, 0.0);
    }

    #[test]
    fn test_describe_skewed_sample() {
        let stats = describe(&[1.0, 2.0, 3.0, 10.0]);
        assert_close(stats.mean, 4.0);
        assert_close(stats.median, 2.5);
        assert_close(stats.std_dev, 4.08248290463863);
        assert_close(stats.skewness, 1.7636326148038877);
    }

    #[test]
    fn test_describe_small_samples() {
        let one = describe(&[7.0]);
        assert_eq!(one.std_dev, Some(0.0));
        assert!(one.skewness.unwrap().is_nan());
        assert_eq!(one.median, Some(7.0));

        let constant = describe(&[2.0, 2.0, 2.0]);
        assert_eq!(constant.std_dev, Some(0.0));
        assert_eq!(constant.skewness, Some(0.0));
    }

    #[test]
    fn test_describe_values_near_f64_limit() {
        let stats = describe(&[1e308, 1e308]);
        assert_eq!(stats.mean, Some(1e308));
        assert_eq!(stats.median, Some(1e308));
        assert_eq!(stats.std_dev, Some(0.0));
    }

    #[test]
    fn test_unparsable_column_yields_count_only() {
        let rows = [["a", "x"], ["", "y"], ["NaN", "z"]];
        let analyzer = StatisticsAnalyzer::new();
        let state = analyzer.compute_state(ColumnIter::new(&rows, 1, 0).unwrap());
        assert_eq!(state.skipped, 3);

        let result = analyzer.compute_result_from_state(&state);
        assert_eq!(result, AnalysisResult::Statistics(Statistics::empty()));
    }
}
