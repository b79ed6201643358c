//! Field-name normalization and cell-value coercion.

use crate::{data::CellValue, vocab};

/// Canonicalizes an arbitrary field or column name.
///
/// Lowercases the input, strips every character that is not an ASCII letter
/// or digit, and resolves the cleaned token through the alias table. Unknown
/// tokens come back as the cleaned token itself; resolution failure is silent
/// and only surfaces as an absent field downstream.
pub fn normalize_key(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let cleaned: String = raw
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    match vocab::resolve_alias(&cleaned) {
        Some(canonical) => canonical.to_string(),
        None => cleaned,
    }
}

/// Converts a raw cell into its typed form.
///
/// Nulls, booleans, and numbers pass through unchanged. Text is trimmed; an
/// empty trimmed string stays an empty string rather than becoming zero.
/// The percent check must run before numeric parsing: values like `"17%"`
/// are display-only metrics and must never collapse to `17`.
pub fn coerce_value(value: CellValue) -> CellValue {
    let raw = match value {
        CellValue::Text(raw) => raw,
        other => return other,
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Text(trimmed.to_string());
    }
    if trimmed.ends_with('%') {
        return CellValue::Text(trimmed.to_string());
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return CellValue::Integer(integer);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if float.is_finite() {
            return CellValue::Float(float);
        }
    }
    CellValue::Text(trimmed.to_string())
}
