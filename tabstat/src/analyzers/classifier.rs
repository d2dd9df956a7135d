//! Column role classification.
//!
//! A column is [`ColumnRole::Numeric`] when the first row holds a number for
//! it and [`ColumnRole::Categorical`] otherwise. Later rows are never
//! consulted: a column that starts with a null or a string is categorical
//! even if every other row is numeric.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::row::{RowSet, Value};

/// Role of a column in the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    Numeric,
    Categorical,
}

impl ColumnRole {
    /// Classifies a single first-row value. NaN counts as numeric.
    pub fn of(value: &Value) -> Self {
        if value.is_number() {
            ColumnRole::Numeric
        } else {
            ColumnRole::Categorical
        }
    }
}

/// Classifies every column of the first row, in first-row order.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`](crate::error::StatsError::EmptyInput)
/// when `rows` is empty.
#[instrument(skip(rows), fields(analyzer = "classifier", rows = rows.len()))]
pub fn classify_columns(rows: &RowSet) -> Result<Vec<(String, ColumnRole)>> {
    let first = rows.require_non_empty("classify_columns")?;
    let roles: Vec<(String, ColumnRole)> = first
        .iter()
        .map(|(column, value)| (column.to_string(), ColumnRole::of(value)))
        .collect();
    debug!(columns = roles.len(), "classified columns");
    Ok(roles)
}

/// Names of the numeric columns, in first-row order.
pub fn numeric_columns(rows: &RowSet) -> Result<Vec<String>> {
    columns_with_role(rows, ColumnRole::Numeric)
}

/// Names of the categorical columns, in first-row order.
pub fn categorical_columns(rows: &RowSet) -> Result<Vec<String>> {
    columns_with_role(rows, ColumnRole::Categorical)
}

fn columns_with_role(rows: &RowSet, role: ColumnRole) -> Result<Vec<String>> {
    Ok(classify_columns(rows)?
        .into_iter()
        .filter(|(_, r)| *r == role)
        .map(|(column, _)| column)
        .collect())
}
