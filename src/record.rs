//! The canonical four-section record and its builder operations.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as Json;

use crate::{data::CellValue, vocab, vocab::Section};

/// Canonical analysis record: one metric map per section, plus an escape
/// hatch preserving input that could not be interpreted.
///
/// A mapped record always carries all four section keys, even when a section
/// ended up empty. When nothing mapped at all, the record instead holds only
/// `raw_data` with the original input, signalling an unrecognized shape
/// without rejecting the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalRecord {
    pub sales: BTreeMap<String, CellValue>,
    pub warehouse: BTreeMap<String, CellValue>,
    pub finance: BTreeMap<String, CellValue>,
    pub crm: BTreeMap<String, CellValue>,
    pub raw_data: Option<Json>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape-hatch record preserving an uninterpretable payload verbatim.
    pub fn raw_passthrough(payload: Json) -> Self {
        CanonicalRecord {
            raw_data: Some(payload),
            ..Self::default()
        }
    }

    /// Copies an already-canonical JSON payload into a record without any
    /// re-mapping or coercion, so a canonical input survives ingestion
    /// unchanged. Section entries are taken verbatim, including metric names
    /// outside the required schema.
    pub fn from_canonical_json(payload: &Json) -> Self {
        let mut record = CanonicalRecord::new();
        for section in Section::ALL {
            if let Some(object) = payload.get(section.as_str()).and_then(Json::as_object) {
                let target = record.section_mut(section);
                for (metric, value) in object {
                    target.insert(metric.clone(), CellValue::from_json(value));
                }
            }
        }
        record
    }

    pub fn section(&self, section: Section) -> &BTreeMap<String, CellValue> {
        match section {
            Section::Sales => &self.sales,
            Section::Warehouse => &self.warehouse,
            Section::Finance => &self.finance,
            Section::Crm => &self.crm,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut BTreeMap<String, CellValue> {
        match section {
            Section::Sales => &mut self.sales,
            Section::Warehouse => &mut self.warehouse,
            Section::Finance => &mut self.finance,
            Section::Crm => &mut self.crm,
        }
    }

    /// Stores a value under the metric's own section binding. Returns false
    /// for names outside the canonical vocabulary, which callers drop.
    pub fn insert(&mut self, metric: &str, value: CellValue) -> bool {
        match vocab::metric_section(metric) {
            Some(section) => {
                self.section_mut(section).insert(metric.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, section: Section, metric: &str) -> Option<&CellValue> {
        self.section(section).get(metric)
    }

    pub fn has_mapped_fields(&self) -> bool {
        Section::ALL
            .iter()
            .any(|section| !self.section(*section).is_empty())
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Unmapped input serializes as the bare escape hatch; a mapped
        // record always shows all four sections.
        if let Some(raw) = &self.raw_data {
            if !self.has_mapped_fields() {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("raw_data", raw)?;
                return map.end();
            }
        }
        let entries = 4 + usize::from(self.raw_data.is_some());
        let mut map = serializer.serialize_map(Some(entries))?;
        for section in Section::ALL {
            map.serialize_entry(section.as_str(), self.section(section))?;
        }
        if let Some(raw) = &self.raw_data {
            map.serialize_entry("raw_data", raw)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_routes_by_metric_binding() {
        let mut record = CanonicalRecord::new();
        assert!(record.insert("total_orders", CellValue::Integer(420)));
        assert!(record.insert("profit", CellValue::Integer(760)));
        assert!(!record.insert("unknown_metric", CellValue::Integer(1)));
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
    fn mapped_record_serializes_all_four_sections() {
        let mut record = CanonicalRecord::new();
        record.insert("leads", CellValue::Integer(510));
        let rendered = serde_json::to_value(&record).unwrap();
        assert_eq!(
            rendered,
            json!({
                "sales": {},
                "warehouse": {},
                "finance": {},
                "crm": {"leads": 510}
            })
        );
    }

    #[test]
    fn raw_passthrough_serializes_only_the_escape_hatch() {
        let original = json!([{"foo": "bar"}]);
        let record = CanonicalRecord::raw_passthrough(original.clone());
        let rendered = serde_json::to_value(&record).unwrap();
        assert_eq!(rendered, json!({"raw_data": original}));
    }

    #[test]
    fn canonical_json_copies_sections_verbatim() {
        let payload = json!({
            "sales": {"total_orders": 420, "repeat": "17%", "custom_kpi": 9},
            "warehouse": {"skus": 310},
            "finance": {},
            "crm": {}
        });
        let record = CanonicalRecord::from_canonical_json(&payload);
        assert_eq!(
            record.get(Section::Sales, "repeat"),
            Some(&CellValue::Text("17%".into()))
        );
        // Unknown metric names inside a canonical payload are kept, not
        // re-validated.
        assert_eq!(
            record.section(Section::Sales).get("custom_kpi"),
            Some(&CellValue::Integer(9))
        );
        assert_eq!(serde_json::to_value(&record).unwrap()["sales"]["custom_kpi"], json!(9));
    }
}
