//! The full result of one analysis run, ready for rendering.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::analyzers::{column_histogram, value_counts, CategoryCount, Histogram};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::row::{PreviewMode, Row, RowSet};
use crate::summary::{analyze, Summary};

/// A [`Summary`] plus the chart data and preview shown alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub summary: Summary,
    /// Flat value counts of the configured frequency columns.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub frequencies: IndexMap<String, CategoryCount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub histograms: Vec<Histogram>,
    #[serde(skip)]
    pub preview: Vec<Row>,
}

impl Report {
    /// Wraps an already assembled summary.
    pub fn new(summary: Summary) -> Self {
        Self {
            summary,
            ..Self::default()
        }
    }

    /// Runs [`analyze`] and collects value counts and histograms for the
    /// configured columns that exist in the schema.
    ///
    /// # Errors
    ///
    /// Fails like [`analyze`].
    #[instrument(skip_all, fields(rows = rows.len(), preview = ?preview))]
    pub fn build(rows: &RowSet, config: &AnalysisConfig, preview: PreviewMode) -> Result<Self> {
        let summary = analyze(rows, config)?;
        let first = rows.require_non_empty("report")?;
        let (row_count, column_count) = rows.shape();

        let frequencies = config
            .frequency_columns
            .iter()
            .filter(|column| first.contains_key(column))
            .map(|column| (column.clone(), value_counts(rows, column)))
            .collect();

        let histograms: Vec<Histogram> = config
            .histogram_columns
            .iter()
            .filter(|column| first.contains_key(column))
            .filter_map(|column| column_histogram(rows, column))
            .collect();
        debug!(histograms = histograms.len(), "collected chart data");

        Ok(Self {
            dataset: None,
            rows: row_count,
            columns: column_count,
            summary,
            frequencies,
            histograms,
            preview: rows.preview(preview).to_vec(),
        })
    }

    /// Sets the dataset name shown in the report header.
    pub fn with_dataset(mut self, name: impl Into<String>) -> Self {
        self.dataset = Some(name.into());
        self
    }
}
