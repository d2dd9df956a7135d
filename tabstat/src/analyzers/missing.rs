//! Missing-value rates per column.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::row::RowSet;

/// Missing-value rate of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    #[serde(rename = "col")]
    pub column: String,
    /// Percentage of missing rows in `[0, 100]`, rounded to 2 decimals.
    #[serde(rename = "perc")]
    pub percentage: f64,
}

impl MissingEntry {
    /// Number of missing rows this percentage corresponds to.
    pub fn missing_count(&self, total_rows: usize) -> usize {
        (self.percentage / 100.0 * total_rows as f64).round() as usize
    }
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the missing percentage of every first-row column.
///
/// A value is missing when it is null, an empty string, or the key is absent
/// from the row. NaN is a value here; only the numeric summarizer drops it.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`](crate::error::StatsError::EmptyInput)
/// when `rows` is empty.
#[instrument(skip(rows), fields(analyzer = "missing", rows = rows.len()))]
pub fn missing_stats(rows: &RowSet) -> Result<Vec<MissingEntry>> {
    let first = rows.require_non_empty("missing_stats")?;
    let total = rows.len() as f64;

    let entries = first
        .columns()
        .map(|column| {
            let missing = rows.iter().filter(|row| row.is_missing(column)).count();
            debug!(column, missing, "counted missing values");
            MissingEntry {
                column: column.to_string(),
                percentage: round2(missing as f64 / total * 100.0),
            }
        })
        .collect();

    Ok(entries)
}
