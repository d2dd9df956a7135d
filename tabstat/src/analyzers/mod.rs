//! Statistics analyzers over a [`RowSet`](crate::row::RowSet).
//!
//! Every analyzer is a plain function that borrows the rows and returns owned
//! results, so they can run in any order against the same data:
//!
//! - [`classifier`]: numeric/categorical column roles from the first row
//! - [`missing`]: missing-value percentage per column
//! - [`numeric`]: count, mean, std and rank-based quartiles per numeric column
//! - [`categorical`]: frequency tables, cross-tabulated with a grouping column
//! - [`histogram`]: fixed or Sturges bin counts over a numeric sample
//!
//! ## Example Usage
//!
//! ```rust
//! use tabstat::analyzers::{missing_stats, numeric_stats};
//! use tabstat::row::{Row, RowSet, Value};
//!
//! let rows = RowSet::from_rows(vec![
//!     Row::from_pairs([("Age", Value::from(22)), ("Sex", Value::from("male"))]),
//!     Row::from_pairs([("Age", Value::from(38)), ("Sex", Value::from("female"))]),
//!     Row::from_pairs([("Age", Value::Null), ("Sex", Value::from("female"))]),
//! ]);
//!
//! let missing = missing_stats(&rows)?;
//! assert_eq!(missing[0].percentage, 33.33);
//!
//! let numeric = numeric_stats(&rows)?;
//! assert_eq!(numeric["Age"].mean_display(), "30.00");
//! # Ok::<(), tabstat::error::StatsError>(())
//! ```

pub mod categorical;
pub mod classifier;
pub mod histogram;
pub mod missing;
pub mod numeric;

pub use categorical::{categorical_stats, value_counts, CategoryCount};
pub use classifier::{categorical_columns, classify_columns, numeric_columns, ColumnRole};
pub use histogram::{bin_count, column_histogram, histogram, Histogram, HistogramBin};
pub use missing::{missing_stats, MissingEntry};
pub use numeric::{format_fixed2, numeric_sample, numeric_stats, rank_quantile, NumericStats};
