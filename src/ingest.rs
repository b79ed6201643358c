//! The normalization engine: decoded input in, canonical record out.
//!
//! Both entry points are pure over their inputs and never fail on
//! malformed-but-present data; complete absence of input is the only case
//! reported back, as `None`.

use serde_json::Value as Json;

use crate::{
    data::RawRow,
    mapper,
    record::CanonicalRecord,
    shape::{self, JsonShape, TableShape},
};

/// Builds the canonical record from a decoded row sequence.
///
/// Returns `None` for an empty sequence. When no column of the input resolves
/// to a canonical metric, the rows are preserved verbatim under `raw_data`.
pub fn build_from_rows(rows: &[RawRow]) -> Option<CanonicalRecord> {
    if rows.is_empty() {
        return None;
    }
    let original = || Json::Array(rows.iter().map(RawRow::to_json).collect());
    build_rows_record(rows, original)
}

/// Builds the canonical record from a JSON payload.
///
/// An already-canonical payload passes through without re-mapping. Arrays and
/// `{"rows": [...]}` wrappers are routed through the table mappers; anything
/// else is preserved under `raw_data`. A JSON `null` counts as absent input.
pub fn build_from_json(payload: &Json) -> Option<CanonicalRecord> {
    if payload.is_null() {
        return None;
    }
    match shape::classify_json(payload) {
        JsonShape::AlreadyCanonical => Some(CanonicalRecord::from_canonical_json(payload)),
        JsonShape::RowSequence => {
            let rows = json_rows(payload);
            if rows.is_empty() {
                return None;
            }
            build_rows_record(&rows, || payload.clone())
        }
        JsonShape::WrappedRows => {
            let inner = &payload["rows"];
            let rows = json_rows(inner);
            if rows.is_empty() {
                return None;
            }
            build_rows_record(&rows, || inner.clone())
        }
        JsonShape::Unstructured => Some(CanonicalRecord::raw_passthrough(payload.clone())),
    }
}

fn build_rows_record(rows: &[RawRow], original: impl FnOnce() -> Json) -> Option<CanonicalRecord> {
    let mut record = CanonicalRecord::new();
    match shape::detect_table_shape(rows) {
        TableShape::Long => mapper::map_long_rows(rows, &mut record),
        TableShape::Wide => mapper::map_wide_row(&rows[0], &mut record),
    }
    if record.has_mapped_fields() {
        Some(record)
    } else {
        Some(CanonicalRecord::raw_passthrough(original()))
    }
}

fn json_rows(payload: &Json) -> Vec<RawRow> {
    payload
        .as_array()
        .map(|rows| rows.iter().map(RawRow::from_json_object).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellValue;
    use crate::vocab::Section;
    use serde_json::json;

    #[test]
    fn empty_input_yields_no_record() {
        assert_eq!(build_from_rows(&[]), None);
        assert_eq!(build_from_json(&Json::Null), None);
        assert_eq!(build_from_json(&json!([])), None);
        assert_eq!(build_from_json(&json!({"rows": []})), None);
    }

    #[test]
    fn canonical_payload_passes_through_unchanged() {
        let payload = json!({
            "sales": {"total_orders": 420, "repeat": "17%"},
            "warehouse": {"skus": 310},
            "finance": {"revenue": 9660},
            "crm": {"leads": 510}
        });
        let record = build_from_json(&payload).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), payload);
    }

    #[test]
    fn row_sequence_payload_is_mapped_wide() {
        let payload = json!([{"Total Orders": 420, "Net Profit": 760}]);
        let record = build_from_json(&payload).unwrap();
        assert_eq!(
            record.get(Section::Sales, "total_orders"),
            Some(&CellValue::Integer(420))
        );
        assert_eq!(
            record.get(Section::Finance, "profit"),
            Some(&CellValue::Integer(760))
        );
    }

    #[test]
    fn wrapped_rows_are_unwrapped_before_mapping() {
        let payload = json!({"rows": [
            {"category": "crm", "metric": "leads", "value": 510},
            {"category": "crm", "metric": "lost leads", "value": 312}
        ]});
        let record = build_from_json(&payload).unwrap();
        assert_eq!(
            record.get(Section::Crm, "leads"),
            Some(&CellValue::Integer(510))
        );
        assert_eq!(
            record.get(Section::Crm, "lost"),
            Some(&CellValue::Integer(312))
        );
    }

    #[test]
    fn unmappable_rows_fall_back_to_the_original_payload() {
        let payload = json!([{"foo": 1, "bar": 2}]);
        let record = build_from_json(&payload).unwrap();
        assert!(!record.has_mapped_fields());
        assert_eq!(record.raw_data, Some(payload));
    }

    #[test]
    fn unstructured_payload_is_wrapped_verbatim() {
        let payload = json!({"quarter": "Q1", "notes": ["a", "b"]});
        let record = build_from_json(&payload).unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"raw_data": payload})
        );
    }
}
