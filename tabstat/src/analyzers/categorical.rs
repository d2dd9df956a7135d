//! Categorical frequency tables, optionally cross-tabulated with a grouping
//! column.

use indexmap::IndexMap;
use tracing::{debug, instrument, warn};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::logging::{truncate_field, MAX_LOGGED_FIELD_LENGTH};
use crate::row::{Row, RowSet, Value};

/// Occurrence count per category key, in first-occurrence order.
pub type CategoryCount = IndexMap<String, usize>;

/// Builds the frequency table of each requested column.
///
/// Keys are the displayed value, or `config.missing_label` for null and
/// absent values. When the configured grouping column is part of the schema
/// the key becomes `"<value> | <group>:<group value>"`, where a null group
/// value reads `null` and an absent one `undefined`.
///
/// Columns are returned in the order requested. A column that is not in the
/// schema is skipped with a warning.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`](crate::error::StatsError::EmptyInput)
/// when `rows` is empty.
#[instrument(
    skip_all,
    fields(analyzer = "categorical", rows = rows.len(), columns = columns.len())
)]
pub fn categorical_stats<S: AsRef<str>>(
    rows: &RowSet,
    columns: &[S],
    config: &AnalysisConfig,
) -> Result<IndexMap<String, CategoryCount>> {
    let first = rows.require_non_empty("categorical_stats")?;
    let group = config
        .grouping_column
        .as_deref()
        .filter(|g| first.contains_key(g));

    let mut result = IndexMap::new();
    for column in columns.iter().map(AsRef::as_ref) {
        if !first.contains_key(column) {
            warn!(
                column = %truncate_field(column, MAX_LOGGED_FIELD_LENGTH),
                "requested categorical column not in schema, skipping"
            );
            continue;
        }

        let mut counts = CategoryCount::new();
        for row in rows {
            let key = category_key(row, column, group, &config.missing_label);
            *counts.entry(key).or_insert(0) += 1;
        }
        debug!(column, categories = counts.len(), grouped = group.is_some(), "counted categories");
        result.insert(column.to_string(), counts);
    }
    Ok(result)
}

fn category_key(row: &Row, column: &str, group: Option<&str>, missing_label: &str) -> String {
    let mut key = match row.get(column) {
        None | Some(Value::Null) => missing_label.to_string(),
        Some(value) => value.to_string(),
    };
    if let Some(group) = group {
        match row.get(group) {
            Some(group_value) => key.push_str(&format!(" | {group}:{group_value}")),
            None => key.push_str(&format!(" | {group}:undefined")),
        }
    }
    key
}

/// Flat frequency of the non-missing values of `column`, in first-occurrence
/// order.
///
/// Unlike [`categorical_stats`] this never cross-tabulates and skips missing
/// values instead of counting them under a label.
#[instrument(skip(rows), fields(analyzer = "value_counts", rows = rows.len()))]
pub fn value_counts(rows: &RowSet, column: &str) -> CategoryCount {
    let mut counts = CategoryCount::new();
    for value in rows.column_values(column).flatten() {
        if value.is_missing() {
            continue;
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}
