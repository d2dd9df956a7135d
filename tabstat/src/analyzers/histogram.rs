//! Histogram binning with a sample-size driven bin count.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::numeric::numeric_sample;
use crate::config::{SMALL_SAMPLE_BINS, SMALL_SAMPLE_THRESHOLD};
use crate::error::{Result, StatsError};
use crate::row::RowSet;

/// One histogram bin covering `[lower, upper)`; the last bin also holds `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Range label, bounds formatted to one decimal: `"0.0-20.0"`.
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    fn new(lower: f64, upper: f64) -> Self {
        Self {
            label: format!("{lower:.1}-{upper:.1}"),
            lower,
            upper,
            count: 0,
        }
    }

    /// Returns the width of the bin.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Contiguous, non-overlapping bins over `[min, max]` of one column's sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Sum of all bin counts; equals the sample size.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count, used to scale text bars.
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Number of bins for a sample of `n` values.
///
/// Fixed at [`SMALL_SAMPLE_BINS`] below [`SMALL_SAMPLE_THRESHOLD`] values,
/// otherwise Sturges' rule `ceil(log2(n) + 1)`.
pub fn bin_count(n: usize) -> usize {
    if n < SMALL_SAMPLE_THRESHOLD {
        SMALL_SAMPLE_BINS
    } else {
        ((n as f64).log2() + 1.0).ceil() as usize
    }
}

/// Width of `bins` equal bins over `[min, max]`.
///
/// # Errors
///
/// Returns [`StatsError::DegenerateRange`] when `min == max`.
pub fn bin_width(min: f64, max: f64, bins: usize) -> Result<f64> {
    let width = (max - min) / bins as f64;
    if width > 0.0 {
        Ok(width)
    } else {
        Err(StatsError::DegenerateRange { value: min })
    }
}

/// Bins `sample` for `column`.
///
/// Returns `None` for an empty sample. The sample must not contain NaN. When
/// every value is identical the result is a single bin holding all of them.
#[instrument(skip(sample), fields(analyzer = "histogram", values = sample.len()))]
pub fn histogram(sample: &[f64], column: &str) -> Option<Histogram> {
    if sample.is_empty() {
        return None;
    }

    let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let k = bin_count(sample.len());

    // Binning runs on halved values when the span overflows f64.
    let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
    let origin = min * scale;

    let bins = match bin_width(origin, max * scale, k) {
        Ok(width) => {
            let mut bins: Vec<HistogramBin> = (0..k)
                .map(|i| {
                    let lower = (origin + width * i as f64) / scale;
                    let upper = if i == k - 1 {
                        max
                    } else {
                        (origin + width * (i + 1) as f64) / scale
                    };
                    HistogramBin::new(lower, upper)
                })
                .collect();
            for &v in sample {
                let index = (((v * scale - origin) / width).floor() as usize).min(k - 1);
                bins[index].count += 1;
            }
            bins
        }
        Err(err) => {
            debug!(column, error = %err, "falling back to a single bin");
            let mut bin = HistogramBin::new(min, max);
            bin.count = sample.len();
            vec![bin]
        }
    };

    debug!(column, bins = bins.len(), "built histogram");
    Some(Histogram {
        column: column.to_string(),
        bins,
    })
}

/// Bins the usable numeric values of `column`.
///
/// Returns `None` when the column has no usable value.
pub fn column_histogram(rows: &RowSet, column: &str) -> Option<Histogram> {
    histogram(&numeric_sample(rows, column), column)
}
