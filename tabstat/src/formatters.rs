//! Rendering of analysis reports for terminals, documents and tools.
//!
//! # Examples
//!
//! ```rust
//! use tabstat::formatters::{HumanFormatter, ReportFormatter};
//! use tabstat::report::Report;
//! use tabstat::summary::Summary;
//!
//! let report = Report::new(Summary::new());
//! let output = HumanFormatter::new().format(&report).unwrap();
//! assert!(output.contains("Rows: 0"));
//! ```

use std::fmt::Write;

use crate::analyzers::{CategoryCount, Histogram, MissingEntry, NumericStats};
use crate::error::Result;
use crate::report::Report;
use crate::row::Row;
use indexmap::IndexMap;

/// Configuration options for rendering reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include a generation timestamp in the header
    pub include_timestamps: bool,
    /// Include the row preview table
    pub include_preview: bool,
    /// Maximum categories listed per column (`None` for all)
    pub max_categories: Option<usize>,
    /// Width in characters of the longest histogram or frequency bar
    pub bar_width: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_timestamps: true,
            include_preview: true,
            max_categories: None,
            bar_width: 40,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration: no timestamp, no preview, short lists.
    pub fn minimal() -> Self {
        Self {
            include_timestamps: false,
            include_preview: false,
            max_categories: Some(10),
            bar_width: 20,
        }
    }

    /// Sets whether to include a timestamp.
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    /// Sets whether to include the row preview.
    pub fn with_preview(mut self, include: bool) -> Self {
        self.include_preview = include;
        self
    }

    /// Sets the maximum number of categories listed per column.
    pub fn with_max_categories(mut self, max: Option<usize>) -> Self {
        self.max_categories = max;
        self
    }

    /// Sets the bar width.
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }
}

/// Trait for rendering a [`Report`] into a string.
pub trait ReportFormatter {
    /// Formats a report.
    fn format(&self, report: &Report) -> Result<String>;

    /// Formats a report with custom configuration.
    fn format_with_config(&self, report: &Report, _config: &FormatterConfig) -> Result<String> {
        self.format(report)
    }
}

/// Formats reports as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

/// Table layout shared by the text formatters.
trait TableStyle {
    fn heading(&self, out: &mut String, title: &str) -> Result<()>;
    fn table(&self, out: &mut String, headers: &[&str], rows: &[Vec<String>]) -> Result<()>;
}

/// Formats reports as aligned plain-text tables for console output.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl TableStyle for HumanFormatter {
    fn heading(&self, out: &mut String, title: &str) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{title}")?;
        writeln!(out, "{}", "=".repeat(title.chars().count()))?;
        Ok(())
    }

    fn table(&self, out: &mut String, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let widths = column_widths(headers, rows);
        let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        write_padded(out, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_padded(out, &rule, &widths)?;
        for row in rows {
            write_padded(out, row, &widths)?;
        }
        Ok(())
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &Report, config: &FormatterConfig) -> Result<String> {
        render(self, report, config)
    }
}

/// Formats reports as Markdown for documentation.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl TableStyle for MarkdownFormatter {
    fn heading(&self, out: &mut String, title: &str) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "## {title}")?;
        writeln!(out)?;
        Ok(())
    }

    fn table(&self, out: &mut String, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        writeln!(out, "| {} |", headers.join(" | "))?;
        writeln!(out, "|{}", " --- |".repeat(headers.len()))?;
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| c.replace('|', "\\|")).collect();
            writeln!(out, "| {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &Report, config: &FormatterConfig) -> Result<String> {
        let mut out = String::from("# Dataset Summary\n");
        out.push_str(&render(self, report, config)?);
        Ok(out)
    }
}

fn render<S: TableStyle>(style: &S, report: &Report, config: &FormatterConfig) -> Result<String> {
    let mut out = String::new();

    writeln!(out)?;
    if let Some(dataset) = &report.dataset {
        writeln!(out, "Dataset: {dataset}")?;
    }
    writeln!(out, "Rows: {} | Cols: {}", report.rows, report.columns)?;
    if config.include_timestamps {
        writeln!(out, "Generated: {}", chrono::Utc::now().to_rfc3339())?;
    }

    if config.include_preview && !report.preview.is_empty() {
        style.heading(&mut out, "Preview")?;
        let (headers, rows) = preview_table(&report.preview);
        let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
        style.table(&mut out, &headers, &rows)?;
    }

    if let Some(missing) = &report.summary.missing {
        style.heading(&mut out, "Missing Values")?;
        style.table(&mut out, &["Column", "% Missing"], &missing_rows(missing))?;
    }

    if let Some(numeric) = &report.summary.numeric {
        if !numeric.is_empty() {
            style.heading(&mut out, "Numeric Statistics")?;
            style.table(
                &mut out,
                &["Col", "N", "Mean", "Std", "Min", "Q1", "Med", "Q3", "Max"],
                &numeric_rows(numeric),
            )?;
        }
    }

    if let Some(categorical) = &report.summary.categorical {
        for (column, counts) in categorical {
            style.heading(&mut out, &format!("Categorical: {column}"))?;
            style.table(
                &mut out,
                &["Category", "Count"],
                &category_rows(counts, config.max_categories),
            )?;
        }
    }

    for (column, counts) in &report.frequencies {
        style.heading(&mut out, &format!("Counts: {column}"))?;
        let max = counts.values().copied().max().unwrap_or(0);
        let rows: Vec<Vec<String>> = limited(counts, config.max_categories)
            .map(|(value, count)| {
                vec![
                    value.clone(),
                    count.to_string(),
                    bar(*count, max, config.bar_width),
                ]
            })
            .collect();
        style.table(&mut out, &[column.as_str(), "Count", ""], &rows)?;
    }

    for histogram in &report.histograms {
        style.heading(&mut out, &format!("Histogram: {}", histogram.column))?;
        style.table(
            &mut out,
            &[histogram.column.as_str(), "Count", ""],
            &histogram_rows(histogram, config.bar_width),
        )?;
    }

    Ok(out)
}

fn preview_table(rows: &[Row]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers: Vec<String> = rows
        .first()
        .map(|row| row.columns().map(str::to_string).collect())
        .unwrap_or_default();
    let body = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|column| {
                    row.get(column)
                        .map_or_else(|| "undefined".to_string(), ToString::to_string)
                })
                .collect()
        })
        .collect();
    (headers, body)
}

fn missing_rows(missing: &[MissingEntry]) -> Vec<Vec<String>> {
    missing
        .iter()
        .map(|entry| vec![entry.column.clone(), format!("{:.2}", entry.percentage)])
        .collect()
}

fn numeric_rows(numeric: &IndexMap<String, NumericStats>) -> Vec<Vec<String>> {
    numeric
        .iter()
        .map(|(column, s)| {
            vec![
                column.clone(),
                s.count.to_string(),
                s.mean_display(),
                s.std_display(),
                s.min.to_string(),
                s.q1.to_string(),
                s.median.to_string(),
                s.q3.to_string(),
                s.max.to_string(),
            ]
        })
        .collect()
}

fn limited(counts: &CategoryCount, max: Option<usize>) -> impl Iterator<Item = (&String, &usize)> {
    counts.iter().take(max.unwrap_or(usize::MAX))
}

fn category_rows(counts: &CategoryCount, max: Option<usize>) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = limited(counts, max)
        .map(|(key, count)| vec![key.clone(), count.to_string()])
        .collect();
    let hidden = counts.len() - rows.len();
    if hidden > 0 {
        rows.push(vec![format!("({hidden} more)"), String::new()]);
    }
    rows
}

fn histogram_rows(histogram: &Histogram, bar_width: usize) -> Vec<Vec<String>> {
    let max = histogram.max_count();
    histogram
        .bins
        .iter()
        .map(|bin| {
            vec![
                bin.label.clone(),
                bin.count.to_string(),
                bar(bin.count, max, bar_width),
            ]
        })
        .collect()
}

/// A bar of `#` scaled so that `max` fills `width` characters.
fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat(count * width / max)
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }
    widths
}

fn write_padded(out: &mut String, cells: &[String], widths: &[usize]) -> Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())?;
    Ok(())
}
