//! # Tabstat - Descriptive Statistics for Tabular Data
//!
//! Tabstat summarizes a collection of rows sharing a schema: how much of
//! each column is missing, distributional statistics for numeric columns,
//! grouped category counts for categorical columns and histogram bins for
//! charting. Two row sets can be concatenated with optional provenance
//! tagging, and every result can be exported as CSV or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabstat::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let csv = "PassengerId,Survived,Sex,Age\n\
//!            1,0,male,22\n\
//!            2,1,female,38\n\
//!            3,1,female,\n";
//! let rows = tabstat::io::parse_csv(csv.as_bytes())?;
//!
//! let config = AnalysisConfig::default().with_categorical_columns(["Sex"]);
//! let summary = analyze(&rows, &config)?;
//!
//! let age = &summary.numeric.as_ref().unwrap()["Age"];
//! assert_eq!(age.count, 2);
//! assert_eq!(age.mean_display(), "30.00");
//!
//! let sex = &summary.categorical.as_ref().unwrap()["Sex"];
//! assert_eq!(sex["female | Survived:1"], 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Data Model
//!
//! A [`row::Row`] maps column names to [`row::Value`]s and keeps the
//! column order it was built with. The first row of a [`row::RowSet`] defines
//! the schema used by classification: a column whose first value is a number
//! is numeric, everything else is categorical. A value is *missing* when it
//! is absent, `Null` or the empty string.
//!
//! ## Architecture
//!
//! - **`analyzers`**: column classification and the four summarizers
//!   (missing values, numeric statistics, grouped categories, histograms)
//! - **`merge`**: concatenation of two row sets with provenance tags
//! - **`summary`**: the exportable [`summary::Summary`] and the
//!   [`summary::analyze`] pipeline
//! - **`report`**: a summary plus chart data and a row preview
//! - **`formatters`**: human, Markdown and JSON rendering of reports
//! - **`io`**: CSV loading with type coercion, CSV and JSON export
//! - **`config`** and **`logging`**: analysis and tracing configuration
//!
//! Everything outside `io` is pure and in-memory.

pub mod analyzers;
pub mod config;
pub mod error;
pub mod formatters;
pub mod io;
pub mod logging;
pub mod merge;
pub mod prelude;
pub mod report;
pub mod row;
pub mod summary;
