//! Cell values and raw row records handed over by the decode layer.
//!
//! A [`RawRow`] is the ordered column-name-to-value mapping produced for each
//! record of a decoded export. Column lookups are case-insensitive because
//! header casing is insignificant in the inputs we accept. [`CellValue`] keeps
//! the distinction between absent, boolean, numeric, and textual cells that
//! the coercion rules depend on; it serializes untagged so records render as
//! plain JSON scalars.

use std::fmt;

use serde::Serialize;
use serde_json::Value as Json;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Truthiness as the key-value mapper applies it when choosing between
    /// candidate hint columns: null, empty text, zero, and `false` all cause
    /// fallthrough to the next candidate.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Boolean(b) => *b,
            CellValue::Integer(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0,
            CellValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn from_json(value: &Json) -> CellValue {
        match value {
            Json::Null => CellValue::Null,
            Json::Bool(b) => CellValue::Boolean(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else {
                    CellValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Json::String(s) => CellValue::Text(s.clone()),
            // Cells are scalar by contract; nested structures are kept as
            // their compact JSON text rather than guessed at.
            other => CellValue::Text(other.to_string()),
        }
    }

    pub fn to_json(&self) -> Json {
        match self {
            CellValue::Null => Json::Null,
            CellValue::Boolean(b) => Json::Bool(*b),
            CellValue::Integer(i) => Json::from(*i),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            CellValue::Text(s) => Json::String(s.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => {
                if v.fract() == 0.0 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One decoded record: column names paired with cell values, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: CellValue) {
        self.fields.push((name.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Case-insensitive column lookup; first match wins.
    pub fn value_ci(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(column, _)| column.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Builds a row from a JSON object's entries. Non-object payloads yield
    /// an empty row, which downstream mapping treats as unmappable.
    pub fn from_json_object(value: &Json) -> RawRow {
        let mut row = RawRow::new();
        if let Some(object) = value.as_object() {
            for (name, value) in object {
                row.push(name.clone(), CellValue::from_json(value));
            }
        }
        row
    }

    pub fn to_json(&self) -> Json {
        let mut object = serde_json::Map::new();
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json());
        }
        Json::Object(object)
    }
}

impl FromIterator<(String, CellValue)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (String, CellValue)>>(iter: T) -> Self {
        RawRow {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_ci_ignores_header_casing() {
        let mut row = RawRow::new();
        row.push("Metric", CellValue::Text("Total Orders".into()));
        row.push("VALUE", CellValue::Integer(420));
        assert_eq!(
            row.value_ci("metric"),
            Some(&CellValue::Text("Total Orders".into()))
        );
        assert_eq!(row.value_ci("value"), Some(&CellValue::Integer(420)));
        assert_eq!(row.value_ci("category"), None);
    }

    #[test]
    fn from_json_preserves_scalar_kinds() {
        let row = RawRow::from_json_object(&json!({
            "orders": 420,
            "aov": 22.5,
            "repeat": "17%",
            "flag": true,
            "empty": null
        }));
        assert_eq!(row.value_ci("orders"), Some(&CellValue::Integer(420)));
        assert_eq!(row.value_ci("aov"), Some(&CellValue::Float(22.5)));
        assert_eq!(row.value_ci("repeat"), Some(&CellValue::Text("17%".into())));
        assert_eq!(row.value_ci("flag"), Some(&CellValue::Boolean(true)));
        assert_eq!(row.value_ci("empty"), Some(&CellValue::Null));
    }

    #[test]
    fn cell_values_serialize_as_bare_scalars() {
        assert_eq!(
            serde_json::to_string(&CellValue::Integer(17)).unwrap(),
            "17"
        );
        assert_eq!(
            serde_json::to_string(&CellValue::Text("17%".into())).unwrap(),
            "\"17%\""
        );
        assert_eq!(serde_json::to_string(&CellValue::Null).unwrap(), "null");
    }

    #[test]
    fn truthiness_matches_hint_selection_rules() {
        assert!(!CellValue::Null.is_truthy());
        assert!(!CellValue::Text(String::new()).is_truthy());
        assert!(!CellValue::Integer(0).is_truthy());
        assert!(CellValue::Text("sales".into()).is_truthy());
        assert!(CellValue::Integer(7).is_truthy());
    }
}
