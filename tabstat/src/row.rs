//! Row-oriented data model: [`Value`], [`Row`] and [`RowSet`].
//!
//! A [`RowSet`] is the unit every analyzer works on. Its schema is whatever
//! the first row carries; later rows may lack keys, which then read as absent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatsError};

/// Number of rows shown by the `head` and `tail` preview modes.
pub const HEAD_TAIL_ROWS: usize = 50;

/// A single cell value after type coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    /// May hold NaN.
    Number(f64),
    Text(String),
}

impl Value {
    /// Returns true for the values the missing-value analysis counts: null
    /// and the empty string. NaN is not missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Returns true if the runtime type is numeric, NaN included.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns the value usable in numeric computations, excluding NaN.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Returns the string slice for text values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// One record: an insertion-ordered mapping from column name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    /// Returns the value for `column`, or `None` when the key is absent.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Sets `column` to `value`, returning the previous value if any.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(column.into(), value.into())
    }

    /// Returns true if the row carries `column`, whatever its value.
    pub fn contains_key(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Returns true if `column` is absent, null or an empty string.
    pub fn is_missing(&self, column: &str) -> bool {
        self.get(column).map_or(true, Value::is_missing)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Which slice of a row set to preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// The first `n` rows.
    First(usize),
    /// The first [`HEAD_TAIL_ROWS`] rows.
    Head,
    /// The last [`HEAD_TAIL_ROWS`] rows.
    Tail,
    All,
}

impl Default for PreviewMode {
    fn default() -> Self {
        PreviewMode::First(5)
    }
}

impl FromStr for PreviewMode {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "head" => Ok(PreviewMode::Head),
            "tail" => Ok(PreviewMode::Tail),
            "all" => Ok(PreviewMode::All),
            other => other.parse::<usize>().map(PreviewMode::First).map_err(|_| {
                StatsError::invalid_config(format!(
                    "unknown preview mode '{s}', expected a row count, head, tail or all"
                ))
            }),
        }
    }
}

/// An ordered sequence of rows. The first row determines the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Row> {
        self.rows.iter_mut()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// The schema-defining first row.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Returns the first row, or [`StatsError::EmptyInput`] naming `operation`.
    pub fn require_non_empty(&self, operation: &str) -> Result<&Row> {
        self.first()
            .ok_or_else(|| StatsError::empty_input(operation))
    }

    /// Fails with [`StatsError::MissingRequiredColumn`] unless the first row
    /// carries `column`.
    pub fn require_column(&self, column: &str) -> Result<()> {
        let first = self.require_non_empty("require_column")?;
        if first.contains_key(column) {
            Ok(())
        } else {
            Err(StatsError::missing_column(column))
        }
    }

    /// Column names of the first row, in order. Empty for an empty set.
    pub fn columns(&self) -> Vec<&str> {
        self.first()
            .map(|row| row.columns().collect())
            .unwrap_or_default()
    }

    /// Returns `(rows, columns)`, counting columns on the first row.
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.first().map_or(0, Row::len))
    }

    /// Values of `column` across all rows; `None` where the key is absent.
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }

    /// Returns the slice of rows shown by `mode`.
    pub fn preview(&self, mode: PreviewMode) -> &[Row] {
        let len = self.rows.len();
        match mode {
            PreviewMode::First(n) => &self.rows[..n.min(len)],
            PreviewMode::Head => &self.rows[..HEAD_TAIL_ROWS.min(len)],
            PreviewMode::Tail => &self.rows[len.saturating_sub(HEAD_TAIL_ROWS)..],
            PreviewMode::All => &self.rows,
        }
    }
}

impl From<Vec<Row>> for RowSet {
    fn from(rows: Vec<Row>) -> Self {
        Self::from_rows(rows)
    }
}

impl FromIterator<Row> for RowSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
