//! Field mapping for wide and long table layouts.

use crate::{
    data::{CellValue, RawRow},
    normalize::{coerce_value, normalize_key},
    record::CanonicalRecord,
    vocab,
};

/// Maps a single wide row's columns into the record.
///
/// Wide format is one logical record per submission, so only the first row of
/// a wide sequence is ever mapped. Columns that do not resolve to a canonical
/// metric are dropped silently; wide input is assumed intentional and
/// tabular noise (spreadsheet row indices and the like) is expected.
pub fn map_wide_row(row: &RawRow, record: &mut CanonicalRecord) {
    for (column, value) in row.iter() {
        let metric = normalize_key(column);
        if vocab::is_canonical_metric(&metric) {
            record.insert(&metric, coerce_value(value.clone()));
        }
    }
}

/// Maps a sequence of long-format rows, each naming one metric observation.
///
/// The stated category/section/module column is informational only: the
/// section actually used is the metric's own fixed binding, which guards
/// against rows carrying an inconsistent category label. Rows whose metric
/// hint does not resolve are dropped.
pub fn map_long_rows(rows: &[RawRow], record: &mut CanonicalRecord) {
    for row in rows {
        let Some(metric_hint) = hint_text(row, &["metric", "field", "kpi"]) else {
            continue;
        };
        let metric = normalize_key(&metric_hint);
        if !vocab::is_canonical_metric(&metric) {
            continue;
        }
        let Some(value) = observation_value(row, &["value", "amount", "current"]) else {
            continue;
        };
        record.insert(&metric, coerce_value(value));
    }
}

/// First truthy value among the candidate columns, rendered as text. A
/// present-but-empty hint falls through to the next candidate.
fn hint_text(row: &RawRow, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|name| row.value_ci(name))
        .find(|value| value.is_truthy())
        .map(|value| value.to_string())
}

/// The observed value: the first non-null candidate column, or null when a
/// candidate column exists but holds no value. `None` only when no value
/// column is present at all, in which case the metric stays unreported.
fn observation_value(row: &RawRow, candidates: &[&str]) -> Option<CellValue> {
    let mut any_present = false;
    for name in candidates {
        if let Some(value) = row.value_ci(name) {
            any_present = true;
            if !value.is_null() {
                return Some(value.clone());
            }
        }
    }
    any_present.then_some(CellValue::Null)
}
