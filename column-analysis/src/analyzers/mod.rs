//! Column analyzers and the machinery to run them.
//!
//! An analyzer walks one column of a dataset together with a label column and
//! produces an [`AnalysisResult`]. Three analyzers are available:
//!
//! - [`DistributionAnalyzer`]: frequency of each raw value, with rare values
//!   folded into an `others` category
//! - [`SpreadAnalyzer`]: numeric values broken out by label, either as
//!   present/absent counts (binary columns) or split around the mean
//! - [`StatisticsAnalyzer`]: count, min, median, mean, max, standard
//!   deviation and skewness
//!
//! Analyzers split their work into a mergeable state and a final result, so a
//! large dataset can be analyzed chunk by chunk and the states merged in
//! order. [`ColumnAnalysis`] closes the set of analyzers into one enum and
//! [`AnalysisRunner`] runs a list of them against a dataset.
//!
//! ## Example Usage
//!
//! ```rust
//! use column_analysis::analyzers::{
//!     AnalysisKind, AnalysisRunner, ColumnAnalysis, ColumnAnalyzer, ColumnIter,
//!     DistributionAnalyzer,
//! };
//!
//! let rows = vec![
//!     vec!["red", "1"],
//!     vec!["blue", "0"],
//!     vec!["red", "1"],
//! ];
//!
//! // One analyzer directly
//! let iter = ColumnIter::new(&rows, 1, 0).unwrap();
//! let result = DistributionAnalyzer::new().analyze(iter);
//! assert_eq!(result.as_distribution().unwrap().count_of("red"), Some(2));
//!
//! // Several through the runner
//! let report = AnalysisRunner::new(0)
//!     .add(ColumnAnalysis::from(AnalysisKind::Spread), 1, "flag")
//!     .run(&rows)
//!     .unwrap();
//! assert!(!report.has_errors());
//! ```

pub mod column;
pub mod context;
pub mod distribution;
pub mod errors;
pub mod numeric;
pub mod runner;
pub mod spread;
pub mod statistics;
pub mod traits;
pub mod types;

pub use column::{ColumnEntry, ColumnIter, Row};
pub use context::{AnalysisFailure, AnalysisMetadata, AnalysisReport, AnalysisSummary, ColumnReport};
pub use distribution::{
    CategoryOrder, DistributionAnalyzer, DistributionState, DEFAULT_FOLD_DIVISOR,
    DEFAULT_OTHERS_LABEL,
};
pub use errors::{AnalyzerError, AnalyzerResult};
pub use numeric::parse_numeric;
pub use runner::{AnalysisKind, AnalysisRunner, ColumnAnalysis, ProgressCallback};
pub use spread::{SpreadAnalyzer, SpreadState};
pub use statistics::{percentile, StatisticsAnalyzer, StatisticsState};
pub use traits::{AnalyzerState, ColumnAnalyzer};
pub use types::{
    AnalysisResult, Category, ContinuousSpread, DiscreteSpread, FrequencyDistribution,
    LabelCounts, SpreadPoint, StatRow, StatValue, Statistics,
};
