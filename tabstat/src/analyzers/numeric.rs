//! Numeric column summaries: count, mean, population standard deviation and
//! rank-based quartiles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::classifier::numeric_columns;
use crate::error::Result;
use crate::row::RowSet;

/// Summary statistics of one numeric column.
///
/// `mean` and `std` are exported as strings with exactly two decimals;
/// quartiles and extremes keep full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: usize,
    #[serde(with = "fixed2")]
    pub mean: f64,
    /// Population standard deviation (divisor `n`).
    #[serde(with = "fixed2")]
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl NumericStats {
    /// Computes the statistics of `values`, or `None` when it is empty.
    ///
    /// NaN must already be filtered out.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            q1: rank_quantile(&sorted, 0.25),
            median: rank_quantile(&sorted, 0.5),
            q3: rank_quantile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }

    /// Mean with two decimals.
    pub fn mean_display(&self) -> String {
        format_fixed2(self.mean)
    }

    /// Standard deviation with two decimals.
    pub fn std_display(&self) -> String {
        format_fixed2(self.std)
    }
}

/// Formats `value` with exactly two decimals, rounding exact ties away from
/// zero (`2.625` gives `"2.63"`).
///
/// Only multiples of `1/8` with an odd numerator sit exactly halfway between
/// two hundredths; every other value already formats to its nearest hundredth.
pub fn format_fixed2(value: f64) -> String {
    let eighths = value * 8.0;
    let is_tie = eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 != 0.0;
    if is_tie {
        format!("{:.2}", (value * 100.0).round() / 100.0)
    } else {
        format!("{value:.2}")
    }
}

/// Nearest-rank-below quantile: `sorted[floor(p * (n - 1))]`, no interpolation.
///
/// `sorted` must be non-empty and ascending.
pub fn rank_quantile(sorted: &[f64], p: f64) -> f64 {
    let index = (p * (sorted.len() - 1) as f64).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Values of `column` usable in numeric computations.
///
/// Null, absent, NaN and non-numeric values are dropped silently.
pub fn numeric_sample(rows: &RowSet, column: &str) -> Vec<f64> {
    rows.column_values(column)
        .filter_map(|value| value.and_then(|v| v.as_number()))
        .collect()
}

/// Summarizes every numeric column, in first-row order.
///
/// Columns with no usable value are omitted.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`](crate::error::StatsError::EmptyInput)
/// when `rows` is empty.
#[instrument(skip(rows), fields(analyzer = "numeric", rows = rows.len()))]
pub fn numeric_stats(rows: &RowSet) -> Result<IndexMap<String, NumericStats>> {
    let mut result = IndexMap::new();
    for column in numeric_columns(rows)? {
        let sample = numeric_sample(rows, &column);
        match NumericStats::from_values(&sample) {
            Some(stats) => {
                debug!(column = %column, count = stats.count, "summarized numeric column");
                result.insert(column, stats);
            }
            None => debug!(column = %column, "numeric column has no valid values, skipping"),
        }
    }
    Ok(result)
}

mod fixed2 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_fixed2(*value))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Fixed2 {
        Text(String),
        Number(f64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Fixed2::deserialize(deserializer)? {
            Fixed2::Number(v) => Ok(v),
            Fixed2::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
