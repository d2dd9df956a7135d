//! Assembly of analysis results into one exportable [`Summary`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::analyzers::{categorical_stats, missing_stats, numeric_stats};
use crate::analyzers::{CategoryCount, MissingEntry, NumericStats};
use crate::config::AnalysisConfig;
use crate::error::{Result, StatsError};
use crate::row::RowSet;

/// Results of the analyses run so far.
///
/// Every section is optional and added independently. Serializes with the
/// keys `missing`, `numeric` and `categorical`; unpopulated sections are
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<MissingEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<IndexMap<String, NumericStats>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorical: Option<IndexMap<String, CategoryCount>>,
}

impl Summary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, missing: Vec<MissingEntry>) -> Self {
        self.set_missing(missing);
        self
    }

    pub fn with_numeric(mut self, numeric: IndexMap<String, NumericStats>) -> Self {
        self.set_numeric(numeric);
        self
    }

    pub fn with_categorical(mut self, categorical: IndexMap<String, CategoryCount>) -> Self {
        self.set_categorical(categorical);
        self
    }

    /// Replaces the missing-value section.
    pub fn set_missing(&mut self, missing: Vec<MissingEntry>) {
        self.missing = Some(missing);
    }

    /// Replaces the numeric section.
    pub fn set_numeric(&mut self, numeric: IndexMap<String, NumericStats>) {
        self.numeric = Some(numeric);
    }

    /// Replaces the categorical section.
    pub fn set_categorical(&mut self, categorical: IndexMap<String, CategoryCount>) {
        self.categorical = Some(categorical);
    }

    /// True when no section has been populated.
    pub fn is_empty(&self) -> bool {
        self.missing.is_none() && self.numeric.is_none() && self.categorical.is_none()
    }

    /// Pretty-printed JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NothingToExport`] for an empty summary.
    pub fn to_json_pretty(&self) -> Result<String> {
        if self.is_empty() {
            return Err(StatsError::NothingToExport);
        }
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the missing-value and numeric analyses, plus the categorical analysis
/// of `config.categorical_columns` when that list is non-empty.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`] for an empty row set and
/// [`StatsError::InvalidConfiguration`] when `config` does not validate.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn analyze(rows: &RowSet, config: &AnalysisConfig) -> Result<Summary> {
    config.validate()?;

    let mut summary = Summary::new()
        .with_missing(missing_stats(rows)?)
        .with_numeric(numeric_stats(rows)?);

    if !config.categorical_columns.is_empty() {
        summary.set_categorical(categorical_stats(
            rows,
            config.categorical_columns.as_slice(),
            config,
        )?);
    }

    info!(
        numeric_columns = summary.numeric.as_ref().map_or(0, IndexMap::len),
        categorical_columns = summary.categorical.as_ref().map_or(0, IndexMap::len),
        "analysis complete"
    );
    Ok(summary)
}
