//! Reports collected by an analysis run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::AnalyzerError;
use super::runner::AnalysisKind;
use super::types::AnalysisResult;

/// The titled outcome of analyzing one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    /// Display title, usually the column name.
    pub title: String,
    /// Index of the analyzed column.
    pub column_index: usize,
    /// Which analysis produced the result.
    pub analysis: AnalysisKind,
    pub result: AnalysisResult,
}

/// Everything produced by an [`AnalysisRunner`](super::AnalysisRunner) run.
///
/// Reports are kept in request order. Failed requests are recorded in
/// `errors` and do not produce a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    reports: Vec<ColumnReport>,
    metadata: AnalysisMetadata,
    errors: Vec<AnalysisFailure>,
}

impl AnalysisReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new report with the given dataset name.
    pub fn with_dataset(dataset_name: impl Into<String>) -> Self {
        Self {
            metadata: AnalysisMetadata::with_dataset(dataset_name),
            ..Self::default()
        }
    }

    /// Appends a column report.
    pub fn push(&mut self, report: ColumnReport) {
        self.reports.push(report);
    }

    /// Returns all column reports in request order.
    pub fn reports(&self) -> &[ColumnReport] {
        &self.reports
    }

    /// Returns the first report with the given title.
    pub fn get(&self, title: &str) -> Option<&ColumnReport> {
        self.reports.iter().find(|r| r.title == title)
    }

    /// Returns the first report with the given title and analysis kind.
    pub fn get_analysis(&self, title: &str, analysis: AnalysisKind) -> Option<&ColumnReport> {
        self.reports
            .iter()
            .find(|r| r.title == title && r.analysis == analysis)
    }

    /// Records an error that occurred while running a request.
    pub fn record_error(&mut self, title: impl Into<String>, analysis: AnalysisKind, error: &AnalyzerError) {
        self.errors.push(AnalysisFailure {
            title: title.into(),
            analysis,
            error: error.to_string(),
        });
    }

    /// Returns all recorded errors.
    pub fn errors(&self) -> &[AnalysisFailure] {
        &self.errors
    }

    /// Checks if any errors occurred during analysis.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the run metadata.
    pub fn metadata(&self) -> &AnalysisMetadata {
        &self.metadata
    }

    /// Returns a mutable reference to the run metadata.
    pub fn metadata_mut(&mut self) -> &mut AnalysisMetadata {
        &mut self.metadata
    }

    /// Merges another report into this one, appending its reports and errors.
    pub fn merge(&mut self, other: AnalysisReport) {
        self.reports.extend(other.reports);
        self.errors.extend(other.errors);
        self.metadata.merge(other.metadata);
    }

    /// Creates a summary of the run.
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_reports: self.reports.len(),
            total_errors: self.errors.len(),
            empty_results: self.reports.iter().filter(|r| r.result.is_empty()).count(),
            dataset_name: self.metadata.dataset_name.clone(),
        }
    }
}

/// Metadata about an analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Name of the dataset being analyzed.
    pub dataset_name: Option<String>,

    /// Number of rows in the analyzed dataset.
    pub row_count: usize,

    /// Timestamp when the analysis started.
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Timestamp when the analysis completed.
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Additional custom metadata.
    pub custom: HashMap<String, String>,
}

impl AnalysisMetadata {
    /// Creates new empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata with a dataset name.
    pub fn with_dataset(name: impl Into<String>) -> Self {
        Self {
            dataset_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Records the start time of the analysis.
    pub fn record_start(&mut self) {
        self.start_time = Some(chrono::Utc::now());
    }

    /// Records the end time of the analysis.
    pub fn record_end(&mut self) {
        self.end_time = Some(chrono::Utc::now());
    }

    /// Returns the duration of the analysis if both start and end times are recorded.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Adds custom metadata.
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.insert(key.into(), value.into());
    }

    fn merge(&mut self, other: AnalysisMetadata) {
        if self.dataset_name.is_none() {
            self.dataset_name = other.dataset_name;
        }
        if self.start_time.is_none() {
            self.start_time = other.start_time;
        }
        if other.end_time > self.end_time {
            self.end_time = other.end_time;
        }
        self.row_count = self.row_count.max(other.row_count);
        self.custom.extend(other.custom);
    }
}

/// A request that failed during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    /// Title of the failed request.
    pub title: String,
    /// Analysis that was requested.
    pub analysis: AnalysisKind,
    /// Error message.
    pub error: String,
}

/// Summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_reports: usize,
    pub total_errors: usize,
    /// Reports whose result is a zero-data placeholder.
    pub empty_results: usize,
    pub dataset_name: Option<String>,
}
