//! Analysis configuration.
//!
//! [`AnalysisConfig`] names the columns that carry special meaning for the
//! analyzers. The defaults match the passenger-manifest layout the tool was
//! first written for (`Survived` as grouping label, `Sex`/`Pclass`/`Embarked`
//! as quick frequency columns, `Age`/`Fare` as histogram columns).

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Sample size below which histograms use a fixed bin count.
pub const SMALL_SAMPLE_THRESHOLD: usize = 50;

/// Bin count used for samples smaller than [`SMALL_SAMPLE_THRESHOLD`].
pub const SMALL_SAMPLE_BINS: usize = 5;

/// Configuration shared by the analyzers, the merger and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Column used to cross-tabulate categorical counts when present in the
    /// schema. `None` disables cross-tabulation.
    pub grouping_column: Option<String>,
    /// Field added to merged rows to record their source.
    pub provenance_field: String,
    /// Key used for null or absent categorical values.
    pub missing_label: String,
    /// Columns summarized by the categorical analysis of the one-shot
    /// pipeline. Empty skips that analysis.
    pub categorical_columns: Vec<String>,
    /// Columns given a flat value count when present.
    pub frequency_columns: Vec<String>,
    /// Columns given a histogram when present.
    pub histogram_columns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grouping_column: Some("Survived".to_string()),
            provenance_field: "Source".to_string(),
            missing_label: "Missing".to_string(),
            categorical_columns: Vec::new(),
            frequency_columns: vec![
                "Sex".to_string(),
                "Pclass".to_string(),
                "Embarked".to_string(),
            ],
            histogram_columns: vec!["Age".to_string(), "Fare".to_string()],
        }
    }
}

impl AnalysisConfig {
    /// Sets the grouping column.
    pub fn with_grouping_column(mut self, column: impl Into<String>) -> Self {
        self.grouping_column = Some(column.into());
        self
    }

    /// Disables cross-tabulation of categorical counts.
    pub fn without_grouping(mut self) -> Self {
        self.grouping_column = None;
        self
    }

    /// Sets the provenance field name used when merging.
    pub fn with_provenance_field(mut self, field: impl Into<String>) -> Self {
        self.provenance_field = field.into();
        self
    }

    /// Sets the label used for null categorical values.
    pub fn with_missing_label(mut self, label: impl Into<String>) -> Self {
        self.missing_label = label.into();
        self
    }

    /// Sets the columns summarized by the categorical analysis.
    pub fn with_categorical_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the columns given flat value counts.
    pub fn with_frequency_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frequency_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the columns given histograms.
    pub fn with_histogram_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.histogram_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Checks that every configured name is non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.provenance_field.trim().is_empty() {
            return Err(StatsError::invalid_config("provenance field must not be empty"));
        }
        if self.missing_label.is_empty() {
            return Err(StatsError::invalid_config("missing label must not be empty"));
        }
        if let Some(group) = &self.grouping_column {
            if group.trim().is_empty() {
                return Err(StatsError::invalid_config(
                    "grouping column must not be empty; use without_grouping() to disable it",
                ));
            }
        }
        let named = self
            .categorical_columns
            .iter()
            .chain(&self.frequency_columns)
            .chain(&self.histogram_columns);
        for column in named {
            if column.trim().is_empty() {
                return Err(StatsError::invalid_config("column names must not be empty"));
            }
        }
        Ok(())
    }
}
