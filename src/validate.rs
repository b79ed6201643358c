//! Required-field validation over canonical records.

use itertools::Itertools;
use serde::Serialize;

use crate::{record::CanonicalRecord, vocab::Section};

/// Sentinel reported when there was no usable input at all.
pub const NO_DATA: &str = "No data";

const SUMMARY_PREVIEW_FIELDS: usize = 3;

/// Outcome of checking a record against the required-field schema.
///
/// Field presence never fails a record: partial ERP exports are expected and
/// still analyzable. `valid` is false only for the no-data sentinel, and that
/// is the only condition callers should treat as blocking.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub missing: Vec<String>,
    pub recommended_missing: Vec<String>,
}

impl ValidationReport {
    pub fn is_complete(&self) -> bool {
        self.valid && self.recommended_missing.is_empty()
    }

    /// One-line readiness summary for terminal display.
    pub fn summary(&self) -> String {
        if !self.valid {
            return "No usable data; provide a CSV, TSV, or JSON export to analyze".to_string();
        }
        if self.recommended_missing.is_empty() {
            return "All required fields present; data is ready for analysis".to_string();
        }
        let preview = self
            .recommended_missing
            .iter()
            .take(SUMMARY_PREVIEW_FIELDS)
            .join(", ");
        let ellipsis = if self.recommended_missing.len() > SUMMARY_PREVIEW_FIELDS {
            ", ..."
        } else {
            ""
        };
        format!(
            "{} recommended field(s) missing: {}{}",
            self.recommended_missing.len(),
            preview,
            ellipsis
        )
    }
}

/// Walks the required-field schema in declaration order and reports every
/// `section.metric` the record does not carry.
pub fn validate(record: Option<&CanonicalRecord>) -> ValidationReport {
    let Some(record) = record else {
        return ValidationReport {
            valid: false,
            missing: vec![NO_DATA.to_string()],
            recommended_missing: Vec::new(),
        };
    };
    let mut gaps = Vec::new();
    for section in Section::ALL {
        for metric in section.metrics() {
            if record.get(section, metric).is_none() {
                gaps.push(format!("{section}.{metric}"));
            }
        }
    }
    ValidationReport {
        valid: true,
        missing: Vec::new(),
        recommended_missing: gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellValue;

    #[test]
    fn absent_input_reports_the_no_data_sentinel() {
        let report = validate(None);
        assert!(!report.valid);
        assert_eq!(report.missing, vec![NO_DATA.to_string()]);
        assert!(report.recommended_missing.is_empty());
    }

    #[test]
    fn missing_fields_are_advisory_only() {
        let mut record = CanonicalRecord::new();
        record.insert("revenue", CellValue::Integer(9660));
        record.insert("expenses", CellValue::Integer(8900));
        let report = validate(Some(&record));
        assert!(report.valid);
        assert!(report.missing.is_empty());
        assert!(report
            .recommended_missing
            .contains(&"finance.profit".to_string()));
        assert!(!report
            .recommended_missing
            .contains(&"finance.revenue".to_string()));
    }

    #[test]
    fn gaps_are_listed_in_declaration_order() {
        let record = CanonicalRecord::new();
        let report = validate(Some(&record));
        assert_eq!(report.recommended_missing.len(), 13);
        assert_eq!(report.recommended_missing[0], "sales.total_orders");
        assert_eq!(report.recommended_missing[4], "warehouse.skus");
        assert_eq!(report.recommended_missing[12], "crm.lost");
    }

    #[test]
    fn null_valued_fields_count_as_present() {
        let mut record = CanonicalRecord::new();
        record.insert("leads", CellValue::Null);
        let report = validate(Some(&record));
        assert!(!report
            .recommended_missing
            .contains(&"crm.leads".to_string()));
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let report = validate(None);
        let rendered = serde_json::to_value(&report).unwrap();
        assert_eq!(rendered["valid"], serde_json::json!(false));
        assert_eq!(
            rendered["missing"],
            serde_json::json!(["No data"])
        );
        assert!(rendered.get("recommendedMissing").is_some());
    }

    #[test]
    fn summary_previews_the_first_three_gaps() {
        let record = CanonicalRecord::new();
        let report = validate(Some(&record));
        let summary = report.summary();
        assert!(summary.starts_with("13 recommended field(s) missing: sales.total_orders"));
        assert!(summary.ends_with(", ..."));
    }
}
