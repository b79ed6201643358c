//! Starter artifacts: the wide-format CSV template and the sample payload.
//!
//! Both are derived from the canonical vocabulary so they cannot drift from
//! the required-field schema.

use serde_json::{Value as Json, json};

use crate::vocab::Section;

/// A complete canonical payload with plausible demo numbers.
pub fn sample_payload() -> Json {
    json!({
        "sales": {
            "total_orders": 420,
            "cancelled": 68,
            "aov": 23,
            "repeat": "17%"
        },
        "warehouse": {
            "skus": 310,
            "out_of_stock": 47,
            "dead_stock": 92
        },
        "finance": {
            "revenue": 9660,
            "expenses": 8900,
            "profit": 760
        },
        "crm": {
            "leads": 510,
            "converted": 84,
            "lost": 312
        }
    })
}

/// Wide-format CSV starter template: every canonical metric as a column,
/// with the sample payload as the single data row.
pub fn template_csv() -> String {
    let sample = sample_payload();
    let mut headers = Vec::new();
    let mut values = Vec::new();
    for section in Section::ALL {
        for metric in section.metrics() {
            headers.push(*metric);
            values.push(render_cell(&sample[section.as_str()][*metric]));
        }
    }
    format!("{}\n{}\n", headers.join(","), values.join(","))
}

fn render_cell(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}
