//! Union of two row sets with optional provenance tagging.

use tracing::{info, instrument};

use crate::config::AnalysisConfig;
use crate::row::RowSet;

/// Labels written into merged rows to record where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceTags {
    /// Name of the field added to each row.
    pub field: String,
    /// Label for rows of the first (base) source.
    pub base_label: String,
    /// Label for rows of the second source.
    pub other_label: String,
}

impl ProvenanceTags {
    pub fn new(
        field: impl Into<String>,
        base_label: impl Into<String>,
        other_label: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            base_label: base_label.into(),
            other_label: other_label.into(),
        }
    }

    /// Tags using the provenance field named in `config`.
    pub fn from_config(
        config: &AnalysisConfig,
        base_label: impl Into<String>,
        other_label: impl Into<String>,
    ) -> Self {
        Self::new(config.provenance_field.clone(), base_label, other_label)
    }
}

/// Concatenates `base` followed by `other`, preserving the order inside each.
///
/// With `tags`, every row receives the label of its source in `tags.field`
/// unless it already carries a non-missing value there. Both inputs are
/// consumed; schemas need not match, and the first row of the result decides
/// the schema for later classification.
#[instrument(
    skip_all,
    fields(base_rows = base.len(), other_rows = other.len(), tagged = tags.is_some())
)]
pub fn merge(mut base: RowSet, mut other: RowSet, tags: Option<&ProvenanceTags>) -> RowSet {
    if let Some(tags) = tags {
        tag_rows(&mut base, &tags.field, &tags.base_label);
        tag_rows(&mut other, &tags.field, &tags.other_label);
    }

    let mut rows = base.into_rows();
    rows.extend(other);
    info!(rows = rows.len(), "merged row sets");
    RowSet::from_rows(rows)
}

fn tag_rows(rows: &mut RowSet, field: &str, label: &str) {
    for row in rows.iter_mut() {
        if row.is_missing(field) {
            row.insert(field, label);
        }
    }
}
