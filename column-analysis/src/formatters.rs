//! Output formatting for analysis reports.
//!
//! This module turns an [`AnalysisReport`] into JSON, human-readable text, or
//! Markdown.
//!
//! # Examples
//!
//! ```rust
//! use column_analysis::analyzers::{AnalysisKind, AnalysisRunner, ColumnAnalysis};
//! use column_analysis::formatters::{HumanFormatter, ResultFormatter};
//!
//! let rows = vec![["1", "A"], ["0", "A"], ["1", "B"]];
//! let report = AnalysisRunner::new(1)
//!     .add(ColumnAnalysis::from(AnalysisKind::Spread), 0, "flag")
//!     .run(&rows)
//!     .unwrap();
//!
//! let output = HumanFormatter::new().format(&report).unwrap();
//! assert!(output.contains("flag (spread)"));
//! ```

use serde::Serialize;
use std::fmt::Write;

use crate::analyzers::{AnalysisReport, AnalysisResult, ColumnReport, StatValue};
use crate::error::{ColumnAnalysisError, Result};
use crate::render::NO_DATA_MESSAGE;

/// Configuration options for formatting analysis reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include run metadata (dataset, rows, duration)
    pub include_metadata: bool,
    /// Include failed requests
    pub include_errors: bool,
    /// Maximum number of spread points listed per series (-1 for all)
    pub max_points: i32,
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
    /// Whether to include timestamps in output
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_metadata: true,
            include_errors: true,
            max_points: 0,
            use_colors: false,
            include_timestamps: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only the results.
    pub fn minimal() -> Self {
        Self {
            include_metadata: false,
            include_errors: false,
            max_points: 0,
            use_colors: false,
            include_timestamps: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            include_metadata: true,
            include_errors: true,
            max_points: -1,
            use_colors: true,
            include_timestamps: true,
        }
    }

    /// Sets whether to include run metadata.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Sets the maximum number of spread points listed per series.
    pub fn with_max_points(mut self, max: i32) -> Self {
        self.max_points = max;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn point_limit(&self, len: usize) -> usize {
        if self.max_points < 0 {
            len
        } else {
            len.min(self.max_points as usize)
        }
    }
}

/// Trait for formatting analysis reports into different output formats.
///
/// # Examples
///
/// ```rust
/// use column_analysis::analyzers::AnalysisReport;
/// use column_analysis::formatters::ResultFormatter;
///
/// struct CountFormatter;
///
/// impl ResultFormatter for CountFormatter {
///     fn format(&self, report: &AnalysisReport) -> column_analysis::Result<String> {
///         Ok(format!("{} results", report.reports().len()))
///     }
/// }
///
/// assert_eq!(CountFormatter.format(&AnalysisReport::new()).unwrap(), "0 results");
/// ```
pub trait ResultFormatter {
    /// Formats a report into a string representation.
    fn format(&self, report: &AnalysisReport) -> Result<String>;

    /// Formats a report with custom configuration.
    fn format_with_config(
        &self,
        report: &AnalysisReport,
        _config: &FormatterConfig,
    ) -> Result<String> {
        // Default implementation ignores config and uses standard format
        self.format(report)
    }
}

fn write_failed(e: std::fmt::Error) -> ColumnAnalysisError {
    ColumnAnalysisError::Serialization(format!("Failed to write report: {e}"))
}

/// Formats reports as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [ColumnReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [crate::analyzers::AnalysisFailure]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a crate::analyzers::AnalysisMetadata>,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &AnalysisReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let filtered = JsonReport {
            results: report.reports(),
            errors: config.include_errors.then(|| report.errors()),
            metadata: config.include_metadata.then(|| report.metadata()),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&filtered)
        } else {
            serde_json::to_string(&filtered)
        };
        json.map_err(|e| {
            ColumnAnalysisError::Serialization(format!("Failed to serialize report to JSON: {e}"))
        })
    }
}

/// Formats reports as plain text for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn write_report(
        output: &mut String,
        report: &AnalysisReport,
        config: &FormatterConfig,
    ) -> std::fmt::Result {
        if config.include_metadata {
            let metadata = report.metadata();
            if let Some(name) = &metadata.dataset_name {
                writeln!(output, "Dataset: {name}")?;
            }
            writeln!(output, "Rows: {}", metadata.row_count)?;
            if config.include_timestamps {
                if let Some(start) = metadata.start_time {
                    writeln!(output, "Started: {}", start.to_rfc3339())?;
                }
            }
            if let Some(duration) = metadata.duration() {
                writeln!(output, "Duration: {}ms", duration.num_milliseconds())?;
            }
            writeln!(output)?;
        }

        for column in report.reports() {
            if config.use_colors {
                writeln!(output, "\x1b[1m{} ({})\x1b[0m", column.title, column.analysis)?;
            } else {
                writeln!(output, "{} ({})", column.title, column.analysis)?;
            }
            Self::write_result(output, &column.result, config)?;
            writeln!(output)?;
        }

        if config.include_errors && report.has_errors() {
            writeln!(output, "Failed analyses:")?;
            for failure in report.errors() {
                writeln!(
                    output,
                    "  {} ({}): {}",
                    failure.title, failure.analysis, failure.error
                )?;
            }
        }
        Ok(())
    }

    fn write_result(
        output: &mut String,
        result: &AnalysisResult,
        config: &FormatterConfig,
    ) -> std::fmt::Result {
        match result {
            AnalysisResult::FrequencyDistribution(dist) => {
                for category in dist.iter() {
                    writeln!(output, "  {:<24} {:>10}", category.name, category.count)?;
                }
            }
            AnalysisResult::DiscreteSpread(spread) => {
                writeln!(output, "  {:<24} {:>10} {:>10}", "class", "present", "absent")?;
                for (label, counts) in &spread.labels {
                    writeln!(
                        output,
                        "  {:<24} {:>10} {:>10}",
                        label, counts.present, counts.absent
                    )?;
                }
            }
            AnalysisResult::ContinuousSpread(spread) => {
                writeln!(output, "  mean {}", StatValue::Float(spread.mean))?;
                for (name, series) in [("low", &spread.low), ("high", &spread.high)] {
                    writeln!(output, "  {name}: {} points", series.len())?;
                    for point in series.iter().take(config.point_limit(series.len())) {
                        writeln!(
                            output,
                            "    {:<22} {}",
                            point.label,
                            StatValue::Float(point.value)
                        )?;
                    }
                }
            }
            AnalysisResult::Statistics(stats) => {
                for row in stats.rows() {
                    writeln!(output, "  {:<10}{}", row.name, row.value)?;
                }
            }
            AnalysisResult::NoData => writeln!(output, "  {NO_DATA_MESSAGE}")?,
        }
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for HumanFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &AnalysisReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        Self::write_report(&mut output, report, config).map_err(write_failed)?;
        Ok(output)
    }
}

/// Formats reports as Markdown, one table per analyzed column.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a new Markdown formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a new Markdown formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 5);
        self
    }

    fn write_report(
        &self,
        output: &mut String,
        report: &AnalysisReport,
        config: &FormatterConfig,
    ) -> std::fmt::Result {
        let h = "#".repeat(self.heading_level as usize);

        writeln!(output, "{h} Column Analysis")?;
        if config.include_metadata {
            writeln!(output)?;
            if let Some(name) = &report.metadata().dataset_name {
                writeln!(output, "**Dataset:** {name}")?;
            }
            writeln!(output, "**Rows:** {}", report.metadata().row_count)?;
        }

        for column in report.reports() {
            writeln!(output)?;
            writeln!(output, "{h}# {} ({})", column.title, column.analysis)?;
            writeln!(output)?;
            match &column.result {
                AnalysisResult::FrequencyDistribution(dist) => {
                    writeln!(output, "| Value | Count |")?;
                    writeln!(output, "|-------|-------|")?;
                    for category in dist.iter() {
                        writeln!(output, "| {} | {} |", category.name, category.count)?;
                    }
                }
                AnalysisResult::DiscreteSpread(spread) => {
                    writeln!(output, "| Class | Present | Absent |")?;
                    writeln!(output, "|-------|---------|--------|")?;
                    for (label, counts) in &spread.labels {
                        writeln!(output, "| {label} | {} | {} |", counts.present, counts.absent)?;
                    }
                }
                AnalysisResult::ContinuousSpread(spread) => {
                    writeln!(output, "| Series | Points |")?;
                    writeln!(output, "|--------|--------|")?;
                    writeln!(output, "| low | {} |", spread.low.len())?;
                    writeln!(output, "| high | {} |", spread.high.len())?;
                    writeln!(output)?;
                    writeln!(output, "Mean: {:.6}", spread.mean)?;
                }
                AnalysisResult::Statistics(stats) => {
                    writeln!(output, "| Name | Value |")?;
                    writeln!(output, "|------|-------|")?;
                    for row in stats.rows() {
                        writeln!(output, "| {} | {} |", row.name, row.value.to_string().trim())?;
                    }
                }
                AnalysisResult::NoData => writeln!(output, "_{NO_DATA_MESSAGE}_")?,
            }
        }

        if config.include_errors && report.has_errors() {
            writeln!(output)?;
            writeln!(output, "{h}# Failed Analyses")?;
            writeln!(output)?;
            for failure in report.errors() {
                writeln!(
                    output,
                    "- **{}** ({}): {}",
                    failure.title, failure.analysis, failure.error
                )?;
            }
        }
        Ok(())
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for MarkdownFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &AnalysisReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        self.write_report(&mut output, report, config)
            .map_err(write_failed)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{AnalysisKind, AnalysisRunner, ColumnAnalysis};

    fn create_test_report() -> AnalysisReport {
        let rows = vec![
            ["1", "2.5", "A"],
            ["0", "7.5", "A"],
            ["1", "x", "B"],
        ];
        AnalysisRunner::new(2)
            .add(ColumnAnalysis::from(AnalysisKind::Spread), 0, "flag")
            .add(ColumnAnalysis::from(AnalysisKind::Statistics), 1, "score")
            .add(ColumnAnalysis::from(AnalysisKind::Spread), 1, "score")
            .add(ColumnAnalysis::from(AnalysisKind::Distribution), 2, "class")
            .add(ColumnAnalysis::from(AnalysisKind::Statistics), 9, "missing")
            .with_dataset_name("test_data")
            .run(&rows)
            .unwrap()
    }

    #[test]
    fn test_formatter_config() {
        let config = FormatterConfig::default();
        assert!(config.include_metadata);
        assert!(!config.use_colors);
        assert_eq!(config.point_limit(10), 0);

        let detailed = FormatterConfig::detailed();
        assert_eq!(detailed.point_limit(10), 10);
        assert_eq!(FormatterConfig::minimal().with_max_points(3).point_limit(10), 3);
    }

    #[test]
    fn test_json_formatter() {
        let report = create_test_report();
        let output = JsonFormatter::new().format(&report).unwrap();
        assert!(output.contains("\"type\": \"discrete_spread\""));
        assert!(output.contains("\"dataset_name\": \"test_data\""));
        assert!(output.contains("\"missing\""));

        let compact = JsonFormatter::new()
            .with_pretty(false)
            .format_with_config(&report, &FormatterConfig::minimal())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 4);
        assert!(value.get("metadata").is_none());
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn test_human_formatter() {
        let report = create_test_report();
        let output = HumanFormatter::new().format(&report).unwrap();

        assert!(output.contains("Dataset: test_data"));
        assert!(output.contains("score (statistics)"));
        assert!(output.contains("  Count                  2"));
        assert!(output.contains("  Mean            5.000000"));
        assert!(output.contains("  mean       5.000000"));
        assert!(output.contains("Failed analyses:"));
        assert!(!output.contains("\x1b["));

        let colored = HumanFormatter::with_config(FormatterConfig::detailed())
            .format(&report)
            .unwrap();
        assert!(colored.contains("\x1b[1m"));
        assert!(colored.contains("    A                            7.500000"));
    }

    #[test]
    fn test_markdown_formatter() {
        let report = create_test_report();
        let output = MarkdownFormatter::new().format(&report).unwrap();
        assert!(output.contains("## Column Analysis"));
        assert!(output.contains("### flag (spread)"));
        assert!(output.contains("| A | 1 | 1 |"));
        assert!(output.contains("| Median | 5.000000 |"));
        assert!(output.contains("- **missing** (statistics)"));

        let output = MarkdownFormatter::new()
            .with_heading_level(1)
            .format(&report)
            .unwrap();
        assert!(output.starts_with("# Column Analysis"));
    }
}
