//! Prelude for commonly used types and functions in tabstat.

pub use crate::analyzers::{
    categorical_stats, column_histogram, missing_stats, numeric_stats, Histogram, MissingEntry,
    NumericStats,
};
pub use crate::config::AnalysisConfig;
pub use crate::error::{Result, StatsError};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::logging::setup::LoggingConfig;
pub use crate::merge::{merge, ProvenanceTags};
pub use crate::report::Report;
pub use crate::row::{PreviewMode, Row, RowSet, Value};
pub use crate::summary::{analyze, Summary};
