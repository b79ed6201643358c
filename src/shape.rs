//! Input shape detection for tabular and JSON payloads.
//!
//! Detection is a pure classification step producing an explicit tag; the
//! ingest pipeline dispatches on the tag. Keeping the heuristics here, apart
//! from the mapping itself, makes each path independently testable.

use serde_json::Value as Json;

use crate::{data::RawRow, vocab::Section};

/// Layout of a decoded row sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// One row holding many metric columns.
    Wide,
    /// One row per metric observation, using category/metric/value columns.
    Long,
}

/// Classifies a row sequence by the first row's column set alone; no attempt
/// is made to reconcile heterogeneous columns across rows.
pub fn detect_table_shape(rows: &[RawRow]) -> TableShape {
    let Some(first) = rows.first() else {
        return TableShape::Wide;
    };
    let columns: Vec<String> = first
        .column_names()
        .map(|name| name.to_ascii_lowercase())
        .collect();
    let has = |name: &str| columns.iter().any(|column| column == name);
    if has("metric") && (has("category") || has("section") || has("module")) {
        TableShape::Long
    } else {
        TableShape::Wide
    }
}

/// Recognized shapes of a pasted or uploaded JSON payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    /// All four section keys present as objects; passes through unmapped.
    AlreadyCanonical,
    /// A sequence of row objects.
    RowSequence,
    /// A `{"rows": [...]}` wrapper around a row sequence.
    WrappedRows,
    /// Anything else; preserved verbatim under the escape hatch.
    Unstructured,
}

pub fn classify_json(payload: &Json) -> JsonShape {
    if is_canonical_payload(payload) {
        JsonShape::AlreadyCanonical
    } else if payload.is_array() {
        JsonShape::RowSequence
    } else if payload
        .get("rows")
        .map(Json::is_array)
        .unwrap_or(false)
    {
        JsonShape::WrappedRows
    } else {
        JsonShape::Unstructured
    }
}

fn is_canonical_payload(payload: &Json) -> bool {
    Section::ALL.iter().all(|section| {
        payload
            .get(section.as_str())
            .map(Json::is_object)
            .unwrap_or(false)
    })
}
