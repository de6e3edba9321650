//! Configuration for column analysis runs.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analyzers::{
    AnalyzerError, AnalyzerResult, CategoryOrder, DistributionAnalyzer, DEFAULT_FOLD_DIVISOR,
    DEFAULT_OTHERS_LABEL,
};
use crate::error::{ColumnAnalysisError, Result};

/// Tunables shared by the analyzers and the runner.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use column_analysis::config::AnalysisConfig;
/// use column_analysis::analyzers::CategoryOrder;
///
/// let config = AnalysisConfig::from_json_str(r#"{"category_order": "alphabetical"}"#).unwrap();
/// assert_eq!(config.category_order, CategoryOrder::Alphabetical);
/// assert_eq!(config.fold_divisor, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Label of the category collecting rare values.
    pub others_label: String,
    /// Values seen in at most `rows / fold_divisor` rows are folded.
    pub fold_divisor: u64,
    /// Order of distribution categories.
    pub category_order: CategoryOrder,
    /// Whether a runner keeps going after a failed request.
    pub continue_on_error: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            others_label: DEFAULT_OTHERS_LABEL.to_string(),
            fold_divisor: DEFAULT_FOLD_DIVISOR,
            category_order: CategoryOrder::default(),
            continue_on_error: true,
        }
    }
}

impl AnalysisConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ColumnAnalysisError::Configuration(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file in JSON format.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the invariants the analyzers rely on.
    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.fold_divisor == 0 {
            return Err(AnalyzerError::invalid_config(
                "fold_divisor must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn with_others_label(mut self, label: impl Into<String>) -> Self {
        self.others_label = label.into();
        self
    }

    pub fn with_fold_divisor(mut self, divisor: u64) -> Self {
        self.fold_divisor = divisor;
        self
    }

    pub fn with_category_order(mut self, order: CategoryOrder) -> Self {
        self.category_order = order;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Builds the distribution analyzer described by this configuration.
    pub fn distribution_analyzer(&self) -> AnalyzerResult<DistributionAnalyzer> {
        Ok(DistributionAnalyzer::new()
            .with_fold_divisor(self.fold_divisor)?
            .with_others_label(self.others_label.clone())
            .with_order(self.category_order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.others_label, "others (<1%)");
        assert_eq!(config.fold_divisor, 100);
        assert_eq!(config.category_order, CategoryOrder::CountDescending);
        assert!(config.continue_on_error);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let err = AnalysisConfig::from_json_str(r#"{"fold_divisor": 0}"#).unwrap_err();
        assert!(err.to_string().contains("fold_divisor"));
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let err = AnalysisConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ColumnAnalysisError::Configuration(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"others_label": "rare", "continue_on_error": false}}"#).unwrap();

        let config = AnalysisConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.others_label, "rare");
        assert!(!config.continue_on_error);
        assert_eq!(config.fold_divisor, 100);
    }
}
