//! Property-based tests for the tabstat summarizers.
//!
//! Each property generates row sets or samples with controlled shape and
//! checks an invariant that must hold for every input:
//!
//! - missing percentages stay in `[0, 100]` and agree with a direct count
//! - numeric summaries are ordered `min <= q1 <= median <= q3 <= max`
//! - histogram bins partition the sample
//! - merging preserves length, order and provenance

use proptest::prelude::*;
use tabstat::analyzers::{bin_count, histogram, missing_stats, numeric_stats, NumericStats};
use tabstat::merge::{merge, ProvenanceTags};
use tabstat::row::{Row, RowSet, Value};

// ============================================================================
// Test Data Generation Utilities
// ============================================================================

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => (-1000.0f64..1000.0).prop_map(Value::Number),
        1 => Just(Value::Null),
        1 => Just(Value::from("")),
        1 => "[a-z]{1,6}".prop_map(Value::from),
    ]
}

/// Rows over columns `a`, `b` and `c`, each key randomly absent.
fn rows_strategy(max_rows: usize) -> impl Strategy<Value = RowSet> {
    let row = prop::collection::vec(prop::option::of(value_strategy()), 3).prop_map(|values| {
        ["a", "b", "c"]
            .into_iter()
            .zip(values)
            .filter_map(|(column, value)| value.map(|v| (column, v)))
            .collect::<Row>()
    });
    prop::collection::vec(row, 1..max_rows).prop_map(RowSet::from_rows)
}

fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 1..300)
}

fn numbered_rows(count: usize, offset: usize) -> RowSet {
    (0..count)
        .map(|i| Row::from_pairs([("Id", Value::from((offset + i) as f64))]))
        .collect()
}

// ============================================================================
// Missing Values
// ============================================================================

proptest! {
    #[test]
    fn prop_missing_percentages_bounded(rows in rows_strategy(60)) {
        let entries = missing_stats(&rows).unwrap();
        prop_assert_eq!(entries.len(), rows.columns().len());

        for entry in &entries {
            prop_assert!((0.0..=100.0).contains(&entry.percentage));
            let expected = rows.iter().filter(|row| row.is_missing(&entry.column)).count();
            prop_assert_eq!(entry.missing_count(rows.len()), expected);
        }
    }
}

// ============================================================================
// Numeric Statistics
// ============================================================================

proptest! {
    #[test]
    fn prop_numeric_summary_is_ordered(sample in sample_strategy()) {
        let stats = NumericStats::from_values(&sample).unwrap();
        prop_assert_eq!(stats.count, sample.len());
        prop_assert!(stats.min <= stats.q1);
        prop_assert!(stats.q1 <= stats.median);
        prop_assert!(stats.median <= stats.q3);
        prop_assert!(stats.q3 <= stats.max);
        prop_assert!(stats.std >= 0.0);

        let tolerance = 1e-6 * stats.max.abs().max(stats.min.abs()).max(1.0);
        prop_assert!(stats.mean >= stats.min - tolerance);
        prop_assert!(stats.mean <= stats.max + tolerance);
    }

    #[test]
    fn prop_numeric_columns_follow_first_row(rows in rows_strategy(40)) {
        let stats = numeric_stats(&rows).unwrap();
        let first = rows.first().unwrap();
        for column in stats.keys() {
            prop_assert!(matches!(first.get(column), Some(Value::Number(_))));
            prop_assert!(stats[column].count <= rows.len());
        }
    }
}

// ============================================================================
// Histograms
// ============================================================================

proptest! {
    #[test]
    fn prop_histogram_partitions_sample(sample in sample_strategy()) {
        let hist = histogram(&sample, "x").unwrap();
        prop_assert_eq!(hist.total(), sample.len());

        let constant = sample.iter().all(|v| *v == sample[0]);
        let expected_bins = if constant { 1 } else { bin_count(sample.len()) };
        prop_assert_eq!(hist.bins.len(), expected_bins);

        for pair in hist.bins.windows(2) {
            prop_assert_eq!(pair[0].upper, pair[1].lower);
            prop_assert!(pair[0].lower <= pair[1].lower);
        }
    }

    #[test]
    fn prop_constant_sample_has_single_bin(value in -1000.0f64..1000.0, n in 1usize..100) {
        let hist = histogram(&vec![value; n], "x").unwrap();
        prop_assert_eq!(hist.bins.len(), 1);
        prop_assert_eq!(hist.bins[0].count, n);
    }
}

// ============================================================================
// Merging
// ============================================================================

proptest! {
    #[test]
    fn prop_merge_preserves_order(left in 0usize..30, right in 0usize..30) {
        let merged = merge(numbered_rows(left, 0), numbered_rows(right, left), None);
        prop_assert_eq!(merged.len(), left + right);
        for (i, row) in merged.iter().enumerate() {
            prop_assert_eq!(row.get("Id"), Some(&Value::from(i as f64)));
        }
    }

    #[test]
    fn prop_merge_tags_every_row(left in 0usize..30, right in 0usize..30) {
        let tags = ProvenanceTags::new("Source", "train", "test");
        let merged = merge(numbered_rows(left, 0), numbered_rows(right, left), Some(&tags));
        for (i, row) in merged.iter().enumerate() {
            let expected = if i < left { "train" } else { "test" };
            prop_assert_eq!(row.get("Source"), Some(&Value::from(expected)));
        }
    }
}
