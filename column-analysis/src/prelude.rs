//! Prelude for commonly used types and traits in column-analysis.

pub use crate::analyzers::{
    AnalysisKind, AnalysisReport, AnalysisResult, AnalysisRunner, ColumnAnalysis,
    ColumnAnalyzer, ColumnIter, Row,
};
pub use crate::config::AnalysisConfig;
pub use crate::dataset::Dataset;
pub use crate::error::{ColumnAnalysisError, Result};
pub use crate::formatters::{FormatterConfig, ResultFormatter};
pub use crate::render::RenderPlan;
pub use crate::sources::{CsvOptions, CsvSource, DataSource};
