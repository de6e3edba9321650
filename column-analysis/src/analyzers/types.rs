//! Result types produced by the column analyzers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The structured outcome of analyzing one column.
///
/// Exactly one variant is produced per analysis run. `NoData` and a
/// `Statistics` with `count == 0` are valid results, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// How often each raw value occurs, small categories folded together.
    FrequencyDistribution(FrequencyDistribution),

    /// Present/absent counts per label for a 0/1 column.
    DiscreteSpread(DiscreteSpread),

    /// Values per label split around the overall mean.
    ContinuousSpread(ContinuousSpread),

    /// No value in the column could be parsed as a number.
    NoData,

    /// Descriptive statistics over the parsed values.
    Statistics(Statistics),
}

impl AnalysisResult {
    /// Returns a short name for the variant.
    pub fn variant_name(&self) -> &'static str {
        match self {
            AnalysisResult::FrequencyDistribution(_) => "frequency_distribution",
            AnalysisResult::DiscreteSpread(_) => "discrete_spread",
            AnalysisResult::ContinuousSpread(_) => "continuous_spread",
            AnalysisResult::NoData => "no_data",
            AnalysisResult::Statistics(_) => "statistics",
        }
    }

    /// Returns true for the zero-data outcomes that should render as a
    /// placeholder.
    pub fn is_empty(&self) -> bool {
        match self {
            AnalysisResult::NoData => true,
            AnalysisResult::Statistics(stats) => stats.count == 0,
            AnalysisResult::FrequencyDistribution(dist) => dist.total() == 0,
            _ => false,
        }
    }

    pub fn as_distribution(&self) -> Option<&FrequencyDistribution> {
        match self {
            AnalysisResult::FrequencyDistribution(dist) => Some(dist),
            _ => None,
        }
    }

    pub fn as_discrete_spread(&self) -> Option<&DiscreteSpread> {
        match self {
            AnalysisResult::DiscreteSpread(spread) => Some(spread),
            _ => None,
        }
    }

    pub fn as_continuous_spread(&self) -> Option<&ContinuousSpread> {
        match self {
            AnalysisResult::ContinuousSpread(spread) => Some(spread),
            _ => None,
        }
    }

    pub fn as_statistics(&self) -> Option<&Statistics> {
        match self {
            AnalysisResult::Statistics(stats) => Some(stats),
            _ => None,
        }
    }
}

/// A single category of a frequency distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The raw field value.
    pub name: String,
    /// Number of rows carrying the value.
    pub count: u64,
}

impl Category {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Frequency counts of the raw values in a column.
///
/// `categories` holds the values that survived folding, in the configured
/// order. `others` is present only when at least one row was folded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrequencyDistribution {
    pub categories: Vec<Category>,
    pub others: Option<Category>,
}

impl FrequencyDistribution {
    /// Sum of all counts, including the folded `others` entry.
    pub fn total(&self) -> u64 {
        self.categories.iter().map(|c| c.count).sum::<u64>()
            + self.others.as_ref().map_or(0, |o| o.count)
    }

    /// Iterates over every emitted category, `others` last.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().chain(self.others.iter())
    }

    /// Returns the count of a surviving category.
    pub fn count_of(&self, name: &str) -> Option<u64> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.count)
    }
}

/// Present/absent tally for one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelCounts {
    /// Values equal to `1.0`.
    pub present: u64,
    /// Values equal to `0.0`.
    pub absent: u64,
}

impl LabelCounts {
    pub fn new(present: u64, absent: u64) -> Self {
        Self { present, absent }
    }

    pub fn total(&self) -> u64 {
        self.present + self.absent
    }
}

/// Per-label present/absent counts, labels sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscreteSpread {
    pub labels: BTreeMap<String, LabelCounts>,
}

impl DiscreteSpread {
    pub fn get(&self, label: &str) -> Option<LabelCounts> {
        self.labels.get(label).copied()
    }
}

/// A `(label, value)` point of a continuous spread series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadPoint {
    pub label: String,
    pub value: f64,
}

impl SpreadPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Values split around the mean of all parsed values.
///
/// Points are ordered by label ascending, then by row order within a label.
/// A value equal to the mean always lands in `low`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousSpread {
    pub mean: f64,
    /// Values strictly greater than `mean`.
    pub high: Vec<SpreadPoint>,
    /// Values less than or equal to `mean`.
    pub low: Vec<SpreadPoint>,
}

impl ContinuousSpread {
    /// Distinct labels across both series, ascending.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .low
            .iter()
            .chain(self.high.iter())
            .map(|p| p.label.as_str())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    pub fn point_count(&self) -> usize {
        self.low.len() + self.high.len()
    }
}

/// Descriptive statistics of a column's numeric values.
///
/// Every field other than `count` is `Some` exactly when `count > 0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "non_finite")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "non_finite")]
    pub median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "non_finite")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "non_finite")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "non_finite")]
    pub std_dev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "non_finite")]
    pub skewness: Option<f64>,
}

/// Serde support for floats that may be `NaN` or infinite.
///
/// JSON has no literal for these, so they are written as the strings
/// `"NaN"`, `"inf"` and `"-inf"` and read back to the same value.
mod non_finite {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if v.is_nan() => serializer.serialize_some("NaN"),
            Some(v) if v.is_infinite() => {
                serializer.serialize_some(if *v > 0.0 { "inf" } else { "-inf" })
            }
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Number(v)) => Ok(Some(v)),
            Some(Repr::Text(text)) => match text.as_str() {
                "NaN" => Ok(Some(f64::NAN)),
                "inf" => Ok(Some(f64::INFINITY)),
                "-inf" => Ok(Some(f64::NEG_INFINITY)),
                other => Err(D::Error::custom(format!("invalid float value '{other}'"))),
            },
        }
    }
}

impl Statistics {
    /// The statistics of a column without any parsable value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Named rows for a name/value table.
    ///
    /// `Count` is always emitted; the remaining rows only when data was
    /// found, in the order minimum, median, mean, maximum, std dev, skewness.
    pub fn rows(&self) -> Vec<StatRow> {
        let mut rows = vec![StatRow::new("Count", StatValue::Int(self.count))];
        let named = [
            ("Minimum", self.min),
            ("Median", self.median),
            ("Mean", self.mean),
            ("Maximum", self.max),
            ("Std Dev", self.std_dev),
            ("Skewness", self.skewness),
        ];
        rows.extend(
            named
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| StatRow::new(name, StatValue::Float(v)))),
        );
        rows
    }
}

/// A single named statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    pub name: String,
    pub value: StatValue,
}

impl StatRow {
    pub fn new(name: impl Into<String>, value: StatValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Value of a statistic row, integer counts kept apart from measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(u64),
    Float(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Int(v) => *v as f64,
            StatValue::Float(v) => *v,
        }
    }
}

/// Fixed-width display: integers as `%14d`, floats as `%14.6f`.
impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{v:>14}"),
            StatValue::Float(v) => write!(f, "{v:>14.6}"),
        }
    }
}
