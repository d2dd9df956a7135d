//! Delimited-text loading and export.
//!
//! This is the boundary around the statistics engine: it turns CSV text into
//! a [`RowSet`] with type coercion, and writes row sets and summaries back
//! out. Nothing in [`crate::analyzers`] depends on it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{info, instrument};

use crate::error::{Result, StatsError};
use crate::row::{Row, RowSet, Value};
use crate::summary::Summary;

/// Converts one raw field into a typed value.
///
/// Empty fields become `Null`, `true`/`false` in any case become booleans,
/// decimal and scientific numbers become `Number`, anything else is text.
/// Words such as `NaN` or `inf` stay text.
pub fn coerce_field(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if looks_numeric(raw) {
        if let Ok(v) = raw.trim().parse::<f64>() {
            return Value::Number(v);
        }
    }
    Value::Text(raw.to_string())
}

fn looks_numeric(raw: &str) -> bool {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    match unsigned.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')),
        _ => false,
    }
}

/// Parses CSV text with a header row into a [`RowSet`].
///
/// Blank lines are skipped. Records shorter than the header leave the
/// trailing columns absent; extra fields are dropped.
///
/// # Errors
///
/// Returns [`StatsError::Csv`] when the input is not valid CSV.
pub fn parse_csv<R: Read>(reader: R) -> Result<RowSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = RowSet::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(column, field)| (column.clone(), coerce_field(field)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Loads a CSV file into a [`RowSet`].
///
/// # Errors
///
/// Returns [`StatsError::Io`] when the file cannot be opened and
/// [`StatsError::Csv`] when it cannot be parsed.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_csv(path: impl AsRef<Path>) -> Result<RowSet> {
    let file = File::open(path.as_ref())?;
    let rows = parse_csv(BufReader::new(file))?;
    let (row_count, column_count) = rows.shape();
    info!(rows = row_count, columns = column_count, "loaded CSV");
    Ok(rows)
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => value.to_string(),
    }
}

/// Writes `rows` as CSV, taking the column order from the first row.
///
/// Keys missing from a later row are written as empty fields; keys that only
/// later rows carry are not written.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`] when there is nothing to write.
pub fn write_csv<W: Write>(rows: &RowSet, writer: W) -> Result<()> {
    let first = rows.require_non_empty("write_csv")?;
    let columns: Vec<&str> = first.columns().collect();

    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&columns)?;
    for row in rows {
        writer.write_record(columns.iter().map(|column| field_text(row.get(column))))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `rows` to a CSV file at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display(), rows = rows.len()))]
pub fn export_csv(rows: &RowSet, path: impl AsRef<Path>) -> Result<()> {
    rows.require_non_empty("export_csv")?;
    let file = File::create(path.as_ref())?;
    write_csv(rows, BufWriter::new(file))?;
    info!("exported rows");
    Ok(())
}

/// Writes `summary` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`StatsError::NothingToExport`] for an empty summary.
pub fn write_summary_json<W: Write>(summary: &Summary, mut writer: W) -> Result<()> {
    let json = summary.to_json_pretty()?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes `summary` to a JSON file at `path`.
///
/// The file is not created when the summary is empty.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn export_summary_json(summary: &Summary, path: impl AsRef<Path>) -> Result<()> {
    if summary.is_empty() {
        return Err(StatsError::NothingToExport);
    }
    let file = File::create(path.as_ref())?;
    write_summary_json(summary, BufWriter::new(file))?;
    info!("exported summary");
    Ok(())
}
