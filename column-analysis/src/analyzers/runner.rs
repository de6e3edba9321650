//! Dispatch over the fixed set of analyses and multi-column orchestration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::column::{ColumnIter, Row};
use super::context::{AnalysisReport, ColumnReport};
use super::distribution::DistributionAnalyzer;
use super::errors::{AnalyzerError, AnalyzerResult};
use super::spread::SpreadAnalyzer;
use super::statistics::StatisticsAnalyzer;
use super::traits::ColumnAnalyzer;
use super::types::AnalysisResult;
use crate::config::AnalysisConfig;
use crate::logging::{truncate_field, DEFAULT_MAX_FIELD_LENGTH};

/// Type alias for progress callback function.
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Names one of the available analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Distribution,
    Spread,
    Statistics,
}

impl AnalysisKind {
    /// Every analysis, in display order.
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::Distribution,
        AnalysisKind::Spread,
        AnalysisKind::Statistics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Distribution => "distribution",
            AnalysisKind::Spread => "spread",
            AnalysisKind::Statistics => "statistics",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distribution" => Ok(AnalysisKind::Distribution),
            "spread" => Ok(AnalysisKind::Spread),
            "statistics" => Ok(AnalysisKind::Statistics),
            other => Err(AnalyzerError::invalid_config(format!(
                "unknown analysis '{other}', expected one of distribution, spread, statistics"
            ))),
        }
    }
}

/// A configured analysis, ready to run against any column.
///
/// # Example
///
/// ```rust
/// use column_analysis::analyzers::{AnalysisKind, ColumnAnalysis};
///
/// let rows = vec![["1", "A"], ["0", "A"], ["1", "B"]];
/// let analysis: AnalysisKind = "Spread".parse().unwrap();
/// let result = ColumnAnalysis::from(analysis).analyze(&rows, 1, 0).unwrap();
/// assert_eq!(result.variant_name(), "discrete_spread");
/// ```
#[derive(Debug, Clone)]
pub enum ColumnAnalysis {
    Distribution(DistributionAnalyzer),
    Spread(SpreadAnalyzer),
    Statistics(StatisticsAnalyzer),
}

impl ColumnAnalysis {
    /// Builds the analysis for `kind` using the tunables of `config`.
    pub fn from_kind(kind: AnalysisKind, config: &AnalysisConfig) -> AnalyzerResult<Self> {
        Ok(match kind {
            AnalysisKind::Distribution => {
                ColumnAnalysis::Distribution(config.distribution_analyzer()?)
            }
            AnalysisKind::Spread => ColumnAnalysis::Spread(SpreadAnalyzer::new()),
            AnalysisKind::Statistics => ColumnAnalysis::Statistics(StatisticsAnalyzer::new()),
        })
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            ColumnAnalysis::Distribution(_) => AnalysisKind::Distribution,
            ColumnAnalysis::Spread(_) => AnalysisKind::Spread,
            ColumnAnalysis::Statistics(_) => AnalysisKind::Statistics,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ColumnAnalysis::Distribution(a) => a.name(),
            ColumnAnalysis::Spread(a) => a.name(),
            ColumnAnalysis::Statistics(a) => a.name(),
        }
    }

    /// Analyzes `column` of `rows`, using `label` as the label column.
    ///
    /// Fails only when a row is too short for the requested indices.
    pub fn analyze<R: Row>(
        &self,
        rows: &[R],
        label: usize,
        column: usize,
    ) -> AnalyzerResult<AnalysisResult> {
        let iter = ColumnIter::new(rows, label, column)?;
        Ok(match self {
            ColumnAnalysis::Distribution(a) => a.analyze(iter),
            ColumnAnalysis::Spread(a) => a.analyze(iter),
            ColumnAnalysis::Statistics(a) => a.analyze(iter),
        })
    }
}

impl From<AnalysisKind> for ColumnAnalysis {
    fn from(kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::Distribution => ColumnAnalysis::Distribution(DistributionAnalyzer::new()),
            AnalysisKind::Spread => ColumnAnalysis::Spread(SpreadAnalyzer::new()),
            AnalysisKind::Statistics => ColumnAnalysis::Statistics(StatisticsAnalyzer::new()),
        }
    }
}

#[derive(Debug, Clone)]
struct AnalysisRequest {
    analysis: ColumnAnalysis,
    column: usize,
    title: String,
}

/// Runs a list of analyses against the columns of one dataset.
///
/// All requests share the label column given to [`AnalysisRunner::new`].
/// Reports come back in the order the requests were added.
///
/// # Example
///
/// ```rust
/// use column_analysis::analyzers::{AnalysisKind, AnalysisRunner, ColumnAnalysis};
///
/// let rows = vec![
///     vec!["1.5", "0", "setosa"],
///     vec!["2.5", "1", "virginica"],
/// ];
///
/// let report = AnalysisRunner::new(2)
///     .add(ColumnAnalysis::from(AnalysisKind::Statistics), 0, "width")
///     .add(ColumnAnalysis::from(AnalysisKind::Spread), 1, "flag")
///     .run(&rows)
///     .unwrap();
///
/// assert_eq!(report.reports().len(), 2);
/// assert_eq!(report.reports()[0].title, "width");
/// ```
#[derive(Clone)]
pub struct AnalysisRunner {
    label: usize,
    requests: Vec<AnalysisRequest>,
    on_progress: Option<ProgressCallback>,
    continue_on_error: bool,
    dataset_name: Option<String>,
}

impl fmt::Debug for AnalysisRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRunner")
            .field("label", &self.label)
            .field("requests", &self.requests)
            .field("continue_on_error", &self.continue_on_error)
            .field("dataset_name", &self.dataset_name)
            .finish_non_exhaustive()
    }
}

impl AnalysisRunner {
    /// Creates an empty runner using `label` as the label column.
    pub fn new(label: usize) -> Self {
        Self {
            label,
            requests: Vec::new(),
            on_progress: None,
            continue_on_error: true,
            dataset_name: None,
        }
    }

    /// Queues `analysis` of `column`, reported under `title`.
    pub fn add(mut self, analysis: ColumnAnalysis, column: usize, title: impl Into<String>) -> Self {
        self.requests.push(AnalysisRequest {
            analysis,
            column,
            title: title.into(),
        });
        self
    }

    /// Sets a progress callback that will be called during execution.
    ///
    /// The callback receives a float between 0.0 and 1.0 indicating progress.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Sets whether to continue execution when individual requests fail.
    ///
    /// Default is true (continue on error).
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Names the dataset in the report metadata.
    pub fn with_dataset_name(mut self, name: impl Into<String>) -> Self {
        self.dataset_name = Some(name.into());
        self
    }

    pub fn label_index(&self) -> usize {
        self.label
    }

    /// Returns the number of queued requests.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Executes every queued request against `rows`.
    ///
    /// Failed requests are recorded in the report. When the runner does not
    /// continue on error, the first failure aborts the run instead.
    #[instrument(skip_all, fields(requests = self.requests.len(), rows = rows.len(), label = self.label))]
    pub fn run<R: Row>(&self, rows: &[R]) -> AnalyzerResult<AnalysisReport> {
        info!("Starting analysis with {} requests", self.requests.len());

        let mut report = match &self.dataset_name {
            Some(name) => AnalysisReport::with_dataset(name.clone()),
            None => AnalysisReport::new(),
        };
        report.metadata_mut().row_count = rows.len();
        report.metadata_mut().record_start();

        let total = self.requests.len() as f64;
        for (idx, request) in self.requests.iter().enumerate() {
            let kind = request.analysis.kind();
            let logged_title = truncate_field(&request.title, DEFAULT_MAX_FIELD_LENGTH);
            debug!(title = %logged_title, column = request.column, analysis = %kind, "Running analysis");

            match request.analysis.analyze(rows, self.label, request.column) {
                Ok(result) => report.push(ColumnReport {
                    title: request.title.clone(),
                    column_index: request.column,
                    analysis: kind,
                    result,
                }),
                Err(e) => {
                    warn!("Analysis {} of '{}' failed: {}", kind, logged_title, e);
                    report.record_error(&request.title, kind, &e);

                    if !self.continue_on_error {
                        return Err(AnalyzerError::execution(format!(
                            "{kind} analysis of '{}' failed: {e}",
                            request.title
                        )));
                    }
                }
            }

            if let Some(ref callback) = self.on_progress {
                callback((idx + 1) as f64 / total);
            }
        }

        report.metadata_mut().record_end();

        if let Some(duration) = report.metadata().duration() {
            info!(
                "Analysis completed in {:.3}s",
                duration.num_milliseconds() as f64 / 1000.0
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["1", "4.0", "a"],
            vec!["0", "2.0", "b"],
            vec!["1", "x", "a"],
        ]
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Distribution".parse::<AnalysisKind>().unwrap(), AnalysisKind::Distribution);
        assert_eq!(" spread ".parse::<AnalysisKind>().unwrap(), AnalysisKind::Spread);
        assert!("histogram".parse::<AnalysisKind>().is_err());
        assert_eq!(AnalysisKind::Statistics.to_string(), "statistics");
    }

    #[test]
    fn test_from_kind_uses_config() {
        let config = AnalysisConfig::default().with_others_label("rest");
        let analysis = ColumnAnalysis::from_kind(AnalysisKind::Distribution, &config).unwrap();
        match analysis {
            ColumnAnalysis::Distribution(ref a) => assert_eq!(a.threshold(1000), 10),
            _ => panic!("Expected distribution analysis"),
        }
        assert_eq!(analysis.kind(), AnalysisKind::Distribution);
        assert_eq!(analysis.name(), "distribution");

        let bad = AnalysisConfig::default().with_fold_divisor(0);
        assert!(ColumnAnalysis::from_kind(AnalysisKind::Distribution, &bad).is_err());
    }

    #[test]
    fn test_runner_keeps_request_order() {
        let report = AnalysisRunner::new(2)
            .add(ColumnAnalysis::from(AnalysisKind::Statistics), 1, "score")
            .add(ColumnAnalysis::from(AnalysisKind::Spread), 0, "flag")
            .add(ColumnAnalysis::from(AnalysisKind::Distribution), 0, "flag")
            .with_dataset_name("sample")
            .run(&rows())
            .unwrap();

        let kinds: Vec<_> = report.reports().iter().map(|r| r.analysis).collect();
        assert_eq!(
            kinds,
            vec![AnalysisKind::Statistics, AnalysisKind::Spread, AnalysisKind::Distribution]
        );
        assert_eq!(report.metadata().row_count, 3);
        assert_eq!(report.metadata().dataset_name.as_deref(), Some("sample"));
        assert!(report.metadata().duration().is_some());

        let stats = report.reports()[0].result.as_statistics().unwrap();
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_progress_callback() {
        let progress = Arc::new(Mutex::new(Vec::new()));
        let progress_clone = progress.clone();

        AnalysisRunner::new(2)
            .add(ColumnAnalysis::from(AnalysisKind::Statistics), 0, "a")
            .add(ColumnAnalysis::from(AnalysisKind::Statistics), 1, "b")
            .on_progress(move |p| progress_clone.lock().unwrap().push(p))
            .run(&rows())
            .unwrap();

        assert_eq!(*progress.lock().unwrap(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_error_recorded_and_run_continues() {
        let report = AnalysisRunner::new(2)
            .add(ColumnAnalysis::from(AnalysisKind::Statistics), 7, "missing")
            .add(ColumnAnalysis::from(AnalysisKind::Statistics), 1, "score")
            .run(&rows())
            .unwrap();

        assert!(report.has_errors());
        assert_eq!(report.errors()[0].title, "missing");
        assert_eq!(report.reports().len(), 1);
    }

    #[test]
    fn test_fail_fast() {
        let result = AnalysisRunner::new(2)
            .add(ColumnAnalysis::from(AnalysisKind::Spread), 7, "missing")
            .continue_on_error(false)
            .run(&rows());

        assert!(matches!(result, Err(AnalyzerError::Execution(_))));
    }
}
