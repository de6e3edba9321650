//! # Column Analysis
//!
//! Analyze one column of a table against a label column and get back a
//! structured result: a frequency distribution, the spread of the values across
//! the labels, or descriptive statistics.
//!
//! ## Overview
//!
//! A dataset is any slice of rows, where a row is an ordered sequence of string
//! fields (`Vec<String>`, `Vec<&str>`, `[&str; N]`, ...). Every analysis takes
//! the rows, the index of the label column and the index of the target column.
//! Values that do not parse as numbers are skipped by the numeric analyses, and
//! a column without any usable value yields a placeholder result instead of an
//! error.
//!
//! ## Quick Start
//!
//! ```rust
//! use column_analysis::prelude::*;
//!
//! let rows = vec![
//!     vec!["5.1", "1", "setosa"],
//!     vec!["7.0", "0", "versicolor"],
//!     vec!["6.3", "1", "virginica"],
//! ];
//!
//! let report = AnalysisRunner::new(2)
//!     .add(ColumnAnalysis::from(AnalysisKind::Statistics), 0, "sepal width")
//!     .add(ColumnAnalysis::from(AnalysisKind::Spread), 1, "flag")
//!     .run(&rows)
//!     .unwrap();
//!
//! let stats = report.reports()[0].result.as_statistics().unwrap();
//! assert_eq!(stats.count, 3);
//! assert_eq!(stats.max, Some(7.0));
//!
//! let plan = RenderPlan::for_result("flag", &report.reports()[1].result);
//! assert!(matches!(plan.kind, column_analysis::render::RenderKind::StackedBar { .. }));
//! ```
//!
//! ## Modules
//!
//! - [`analyzers`]: the three analyzers, their results and the runner
//! - [`dataset`] and [`sources`]: in-memory tables and CSV/TSV loading
//! - [`render`]: how each result is meant to be drawn
//! - [`formatters`]: JSON, text and Markdown reports
//! - [`background`]: run an analysis off the caller's thread with a
//!   completion signal
//! - [`prediction`]: ranking regression predictions by error
//! - [`config`] and [`logging`]: tunables and `tracing` setup

pub mod analyzers;
pub mod background;
pub mod config;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prediction;
pub mod prelude;
pub mod render;
pub mod sources;

pub use error::{ColumnAnalysisError, Result};
