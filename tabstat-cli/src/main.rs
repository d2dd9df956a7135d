//! tabstat command line
//!
//! Loads a CSV file, optionally appends a second one, prints a statistics
//! report and exports the results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tabstat::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
use tabstat::io::{export_csv, export_summary_json, read_csv};
use tabstat::logging::setup::{init_logging, LoggingConfig};
use tabstat::prelude::*;
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Markdown,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file to analyze
    input: PathBuf,

    /// Second CSV file appended to the first before analysis
    #[arg(long)]
    merge: Option<PathBuf>,

    /// Tag every merged row with the name of the file it came from
    #[arg(long, requires = "merge")]
    tag_source: bool,

    /// Field that receives the source tag
    #[arg(long)]
    source_field: Option<String>,

    /// Columns to cross-tabulate (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    categorical: Vec<String>,

    /// Grouping column for categorical counts
    #[arg(long, conflicts_with = "no_grouping")]
    grouping: Option<String>,

    /// Count categories without a grouping column
    #[arg(long)]
    no_grouping: bool,

    /// Columns given a flat value count (comma separated)
    #[arg(long, value_delimiter = ',')]
    frequency: Option<Vec<String>>,

    /// Columns given a histogram (comma separated)
    #[arg(long, value_delimiter = ',')]
    histogram: Option<Vec<String>>,

    /// Rows to preview: a count, head, tail or all
    #[arg(long, default_value = "5")]
    preview: PreviewMode,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Maximum categories listed per column
    #[arg(long)]
    max_categories: Option<usize>,

    /// Omit the generation timestamp
    #[arg(long)]
    no_timestamps: bool,

    /// Write the summary as JSON to this path
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Write the (merged) rows as CSV to this path
    #[arg(long)]
    merged_out: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log warnings only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Explicit tracing filter, e.g. `tabstat=trace`
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn logging_config(&self) -> LoggingConfig {
        let config = if self.quiet {
            LoggingConfig::production()
        } else {
            match self.verbose {
                0 => LoggingConfig::default(),
                1 => LoggingConfig::development(),
                _ => LoggingConfig::development().with_tabstat_level(Level::TRACE),
            }
        }
        .with_json_format(self.json_logs);

        match &self.log_filter {
            Some(filter) => config.with_env_filter(filter),
            None => config,
        }
    }

    fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::default().with_categorical_columns(&self.categorical);
        if self.no_grouping {
            config = config.without_grouping();
        } else if let Some(grouping) = &self.grouping {
            config = config.with_grouping_column(grouping);
        }
        if let Some(field) = &self.source_field {
            config = config.with_provenance_field(field);
        }
        if let Some(columns) = &self.frequency {
            config = config.with_frequency_columns(columns);
        }
        if let Some(columns) = &self.histogram {
            config = config.with_histogram_columns(columns);
        }
        config
    }

    fn formatter_config(&self) -> FormatterConfig {
        FormatterConfig::default()
            .with_timestamps(!self.no_timestamps)
            .with_max_categories(self.max_categories)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load(path: &Path) -> Result<RowSet> {
    read_csv(path).with_context(|| format!("failed to load {}", path.display()))
}

fn run(args: &Args) -> Result<()> {
    let config = args.analysis_config();
    config.validate().context("invalid analysis options")?;

    let mut dataset = file_label(&args.input);
    let mut rows = load(&args.input)?;

    if let Some(other_path) = &args.merge {
        let other = load(other_path)?;
        let other_label = file_label(other_path);
        let tags = args
            .tag_source
            .then(|| ProvenanceTags::from_config(&config, dataset.clone(), other_label.clone()));
        rows = merge(rows, other, tags.as_ref());
        dataset = format!("{dataset} + {other_label}");
        info!(rows = rows.len(), "datasets merged");
    }

    if let Some(path) = &args.merged_out {
        export_csv(&rows, path).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "rows exported");
    }

    let report = Report::build(&rows, &config, args.preview)
        .context("analysis failed")?
        .with_dataset(dataset);

    let formatter_config = args.formatter_config();
    let output = match args.format {
        OutputFormat::Human => HumanFormatter::with_config(formatter_config).format(&report),
        OutputFormat::Markdown => MarkdownFormatter::with_config(formatter_config).format(&report),
        OutputFormat::Json => JsonFormatter::new().format(&report),
    }
    .context("failed to render report")?;
    println!("{output}");

    if let Some(path) = &args.summary_out {
        export_summary_json(&report.summary, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "summary exported");
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.logging_config())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tabstat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_options() {
        let args = parse(&["train.csv"]);
        assert_eq!(args.preview, PreviewMode::First(5));
        assert_eq!(args.format, OutputFormat::Human);
        assert_eq!(args.analysis_config(), AnalysisConfig::default());
    }

    #[test]
    fn test_analysis_options() {
        let args = parse(&[
            "train.csv",
            "-c",
            "Sex,Embarked",
            "--no-grouping",
            "--histogram",
            "Age",
            "--preview",
            "tail",
        ]);
        let config = args.analysis_config();
        assert_eq!(config.categorical_columns, vec!["Sex", "Embarked"]);
        assert_eq!(config.grouping_column, None);
        assert_eq!(config.histogram_columns, vec!["Age"]);
        assert_eq!(args.preview, PreviewMode::Tail);
    }

    #[test]
    fn test_logging_options() {
        fn filter(extra: &[&str]) -> String {
            let mut argv = vec!["train.csv"];
            argv.extend_from_slice(extra);
            parse(&argv).logging_config().env_filter()
        }

        assert_eq!(filter(&[]), "warn,tabstat=info,tabstat_cli=info");
        assert_eq!(filter(&["-v"]), "debug,tabstat=debug,tabstat_cli=debug");
        assert_eq!(filter(&["-vv"]), "debug,tabstat=trace,tabstat_cli=trace");
        assert_eq!(filter(&["--quiet"]), "warn,tabstat=warn,tabstat_cli=warn");
        assert_eq!(filter(&["--log-filter", "tabstat=trace"]), "tabstat=trace");

        assert!(!parse(&["train.csv", "--quiet"]).logging_config().json_format);
        assert!(parse(&["train.csv", "--json-logs"]).logging_config().json_format);
        assert!(Args::try_parse_from(["tabstat", "train.csv", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_invalid_arguments() {
        let argv = |extra: &[&'static str]| {
            let mut v = vec!["tabstat", "train.csv"];
            v.extend_from_slice(extra);
            v
        };
        assert!(Args::try_parse_from(argv(&["--tag-source"])).is_err());
        assert!(Args::try_parse_from(argv(&["--preview", "middle"])).is_err());
        assert!(Args::try_parse_from(argv(&["--grouping", "Pclass", "--no-grouping"])).is_err());
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let train = dir.path().join("train.csv");
        let test = dir.path().join("test.csv");
        fs::write(&train, "PassengerId,Survived,Sex\n1,0,male\n2,1,female\n").unwrap();
        fs::write(&test, "PassengerId,Sex\n3,female\n").unwrap();
        let merged = dir.path().join("merged.csv");
        let summary = dir.path().join("summary.json");

        let args = parse(&[
            train.to_str().unwrap(),
            "--merge",
            test.to_str().unwrap(),
            "--tag-source",
            "-c",
            "Sex",
            "--merged-out",
            merged.to_str().unwrap(),
            "--summary-out",
            summary.to_str().unwrap(),
        ]);
        run(&args).unwrap();

        let merged = fs::read_to_string(merged).unwrap();
        assert_eq!(
            merged,
            concat!(
                "PassengerId,Survived,Sex,Source\n",
                "1,0,male,train.csv\n",
                "2,1,female,train.csv\n",
                "3,,female,test.csv\n",
            )
        );
        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(summary).unwrap()).unwrap();
        assert_eq!(summary["categorical"]["Sex"]["female | Survived:undefined"], 1);
    }

    #[test]
    fn test_run_reports_missing_file() {
        let args = parse(&["does-not-exist.csv"]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("failed to load does-not-exist.csv"));
    }
}
