//! Toolkit-neutral description of how an analysis result is drawn.
//!
//! A [`RenderPlan`] says which kind of chart or table shows a result and with
//! what data, leaving the drawing itself to whatever front end consumes it.

use serde::{Deserialize, Serialize};

use crate::analyzers::{AnalysisResult, StatRow};

/// Axis title for the label classes.
pub const CLASS_AXIS: &str = "class";
/// Axis title for counts and values.
pub const COUNT_AXIS: &str = "count";
/// Message shown in place of a chart when no numeric value was found.
pub const NO_DATA_MESSAGE: &str = "No numeric data points found.";

/// Preferred width and height of a rendered result, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PreferredSize {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
        }
    }
}

/// A named data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<T> {
    pub name: String,
    pub points: Vec<T>,
}

impl<T> Series<T> {
    pub fn new(name: impl Into<String>, points: Vec<T>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// What to draw for one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderKind {
    /// One sector per category.
    Pie { sectors: Vec<(String, u64)> },
    /// One bar per label, split in a present and an absent segment.
    StackedBar {
        x_axis: String,
        y_axis: String,
        categories: Vec<String>,
        /// Present series first, absent second; values follow `categories`.
        series: Vec<Series<u64>>,
    },
    /// Points keyed by label, in a low and a high series.
    Scatter {
        x_axis: String,
        y_axis: String,
        categories: Vec<String>,
        /// Low series first, high second.
        series: Vec<Series<(String, f64)>>,
        mean: f64,
        show_legend: bool,
    },
    /// Name/value rows.
    Table {
        columns: [String; 2],
        rows: Vec<StatRow>,
    },
    /// Nothing to chart.
    Placeholder { message: String },
}

/// A titled, sized [`RenderKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub title: String,
    pub size: PreferredSize,
    pub kind: RenderKind,
}

impl RenderPlan {
    /// Plans how to draw `result` under `title`.
    ///
    /// ```rust
    /// use column_analysis::analyzers::AnalysisResult;
    /// use column_analysis::render::{RenderKind, RenderPlan, NO_DATA_MESSAGE};
    ///
    /// let plan = RenderPlan::for_result("width", &AnalysisResult::NoData);
    /// assert_eq!(
    ///     plan.kind,
    ///     RenderKind::Placeholder { message: NO_DATA_MESSAGE.to_string() }
    /// );
    /// ```
    pub fn for_result(title: impl Into<String>, result: &AnalysisResult) -> Self {
        let kind = match result {
            AnalysisResult::FrequencyDistribution(dist) => RenderKind::Pie {
                sectors: dist.iter().map(|c| (c.name.clone(), c.count)).collect(),
            },
            AnalysisResult::DiscreteSpread(spread) => {
                let categories: Vec<String> = spread.labels.keys().cloned().collect();
                let present = spread.labels.values().map(|c| c.present).collect();
                let absent = spread.labels.values().map(|c| c.absent).collect();
                RenderKind::StackedBar {
                    x_axis: CLASS_AXIS.to_string(),
                    y_axis: COUNT_AXIS.to_string(),
                    categories,
                    series: vec![Series::new("present", present), Series::new("absent", absent)],
                }
            }
            AnalysisResult::ContinuousSpread(spread) => {
                let points = |series: &[crate::analyzers::SpreadPoint]| {
                    series
                        .iter()
                        .map(|p| (p.label.clone(), p.value))
                        .collect::<Vec<_>>()
                };
                RenderKind::Scatter {
                    x_axis: CLASS_AXIS.to_string(),
                    y_axis: COUNT_AXIS.to_string(),
                    categories: spread.labels().into_iter().map(str::to_string).collect(),
                    series: vec![
                        Series::new("low", points(&spread.low)),
                        Series::new("high", points(&spread.high)),
                    ],
                    mean: spread.mean,
                    show_legend: false,
                }
            }
            AnalysisResult::Statistics(stats) => RenderKind::Table {
                columns: ["name".to_string(), "value".to_string()],
                rows: stats.rows(),
            },
            AnalysisResult::NoData => RenderKind::Placeholder {
                message: NO_DATA_MESSAGE.to_string(),
            },
        };

        Self {
            title: title.into(),
            size: PreferredSize::default(),
            kind,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = PreferredSize { width, height };
        self
    }
}
