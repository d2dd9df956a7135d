//! End-to-end tests: load CSV files, merge them, analyze, render and export.

use std::fs;
use std::path::Path;

use tabstat::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ReportFormatter};
use tabstat::io::{export_csv, export_summary_json, read_csv};
use tabstat::prelude::*;
use tempfile::TempDir;

const TRAIN: &str = "\
PassengerId,Survived,Pclass,Sex,Age,Fare,Embarked
1,0,3,male,22,7.25,S
2,1,1,female,38,71.2833,C
3,1,3,female,,7.925,S
4,1,1,female,35,53.1,S
5,0,3,male,35,8.05,
";

const TEST: &str = "\
PassengerId,Pclass,Sex,Age,Fare,Embarked
892,3,male,34.5,7.8292,Q
893,3,female,47,7,S
";

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn load_fixtures() -> (TempDir, RowSet, RowSet) {
    let dir = TempDir::new().unwrap();
    let train = read_csv(write_file(dir.path(), "train.csv", TRAIN)).unwrap();
    let test = read_csv(write_file(dir.path(), "test.csv", TEST)).unwrap();
    (dir, train, test)
}

#[test]
fn test_missing_and_numeric_on_small_manifest() {
    let rows = RowSet::from_rows(vec![
        Row::from_pairs([("Age", Value::from(22)), ("Sex", Value::from("male"))]),
        Row::from_pairs([("Age", Value::from(38)), ("Sex", Value::from("female"))]),
        Row::from_pairs([("Age", Value::Null), ("Sex", Value::from("female"))]),
    ]);

    let missing = missing_stats(&rows).unwrap();
    assert_eq!(missing[0].column, "Age");
    assert_eq!(missing[0].percentage, 33.33);
    assert_eq!(missing[1].column, "Sex");
    assert_eq!(missing[1].percentage, 0.0);

    let age = &numeric_stats(&rows).unwrap()["Age"];
    assert_eq!(age.count, 2);
    assert_eq!(age.mean_display(), "30.00");
    assert_eq!((age.min, age.median, age.max), (22.0, 22.0, 38.0));
}

#[test]
fn test_grouped_categories() {
    let rows = RowSet::from_rows(vec![
        Row::from_pairs([("Sex", Value::from("male")), ("Survived", Value::from(0))]),
        Row::from_pairs([("Sex", Value::from("male")), ("Survived", Value::from(1))]),
    ]);
    let stats = categorical_stats(&rows, &["Sex"], &AnalysisConfig::default()).unwrap();
    let sex = &stats["Sex"];
    assert_eq!(sex.len(), 2);
    assert_eq!(sex["male | Survived:0"], 1);
    assert_eq!(sex["male | Survived:1"], 1);
}

#[test]
fn test_histogram_over_ten_values() {
    let rows: RowSet = [0.0, 5.0, 15.0, 25.0, 35.0, 55.0, 65.0, 75.0, 90.0, 100.0]
        .into_iter()
        .map(|v| Row::from_pairs([("Score", Value::from(v))]))
        .collect();
    let hist = column_histogram(&rows, "Score").unwrap();
    let labels: Vec<&str> = hist.bins.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["0.0-20.0", "20.0-40.0", "40.0-60.0", "60.0-80.0", "80.0-100.0"]
    );
    assert_eq!(hist.total(), 10);
}

#[test]
fn test_load_merge_and_analyze() {
    let (_dir, train, test) = load_fixtures();
    assert_eq!(train.shape(), (5, 7));
    assert_eq!(test.shape(), (2, 6));

    let config = AnalysisConfig::default().with_categorical_columns(["Sex", "Embarked"]);
    let tags = ProvenanceTags::from_config(&config, "train.csv", "test.csv");
    let merged = merge(train, test, Some(&tags));
    assert_eq!(merged.len(), 7);
    assert_eq!(merged.rows()[0].get("Source"), Some(&Value::from("train.csv")));
    assert_eq!(merged.rows()[6].get("Source"), Some(&Value::from("test.csv")));

    let summary = analyze(&merged, &config).unwrap();

    // Test rows have no Survived key, so they count as missing.
    let missing = summary.missing.as_ref().unwrap();
    let survived = missing.iter().find(|e| e.column == "Survived").unwrap();
    assert_eq!(survived.percentage, 28.57);
    let source = missing.iter().find(|e| e.column == "Source").unwrap();
    assert_eq!(source.percentage, 0.0);

    let numeric = summary.numeric.as_ref().unwrap();
    assert_eq!(
        numeric.keys().collect::<Vec<_>>(),
        vec!["PassengerId", "Survived", "Pclass", "Age", "Fare"]
    );
    assert_eq!(numeric["Age"].count, 6);
    assert_eq!(numeric["Survived"].count, 5);

    let categorical = summary.categorical.as_ref().unwrap();
    assert_eq!(categorical["Sex"]["female | Survived:1"], 3);
    assert_eq!(categorical["Sex"]["male | Survived:undefined"], 1);
    assert_eq!(categorical["Embarked"]["Missing | Survived:0"], 1);
}

#[test]
fn test_export_round_trip() {
    let (dir, train, test) = load_fixtures();
    let merged = merge(train, test, None);

    let csv_path = dir.path().join("merged.csv");
    export_csv(&merged, &csv_path).unwrap();
    let reloaded = read_csv(&csv_path).unwrap();
    assert_eq!(reloaded.len(), 7);
    assert_eq!(reloaded.columns(), merged.columns());
    assert!(reloaded.rows()[5].is_missing("Survived"));
    assert_eq!(reloaded.rows()[5].get("Age"), Some(&Value::from(34.5)));

    let summary = analyze(&merged, &AnalysisConfig::default()).unwrap();
    let json_path = dir.path().join("summary.json");
    export_summary_json(&summary, &json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["missing"][0]["col"], "PassengerId");
    assert_eq!(json["numeric"]["Pclass"]["count"], 7);
    assert!(json["numeric"]["Fare"]["mean"].is_string());
    assert!(json.get("categorical").is_none());
}

#[test]
fn test_empty_summary_is_not_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.json");
    let err = export_summary_json(&Summary::new(), &path).unwrap_err();
    assert!(matches!(err, StatsError::NothingToExport));
    assert!(!path.exists());
}

#[test]
fn test_report_rendering() {
    let (_dir, train, _) = load_fixtures();
    let report = Report::build(&train, &AnalysisConfig::default(), PreviewMode::Head)
        .unwrap()
        .with_dataset("train.csv");
    assert_eq!(report.preview.len(), 5);
    assert_eq!(
        report.frequencies.keys().collect::<Vec<_>>(),
        vec!["Sex", "Pclass", "Embarked"]
    );
    assert_eq!(report.frequencies["Embarked"]["S"], 3);
    assert_eq!(report.histograms.len(), 2);

    let human = HumanFormatter::with_config(FormatterConfig::minimal())
        .format(&report)
        .unwrap();
    assert!(human.contains("Rows: 5 | Cols: 7"));
    assert!(human.contains("Counts: Pclass"));
    assert!(human.contains("Histogram: Fare"));

    let json = JsonFormatter::new().format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["histograms"][0]["column"], "Age");
}
