//! Decoder boundary: files or stdin in, raw rows or JSON payloads out.
//!
//! All file I/O flows through this module. It resolves the input format from
//! the file extension (with manual override), resolves CSV delimiters
//! (`.tsv` routes to tab), decodes non-UTF-8 inputs via `encoding_rs`, and
//! supports the `-` path convention for standard input. Syntax-level decode
//! failures are raised here; semantic field resolution is entirely the
//! engine's concern and never fails.

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use serde_json::Value as Json;
use thiserror::Error;

use crate::data::{CellValue, RawRow};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// Decode-layer classification failures.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Unsupported input format '.{0}'; expected .csv, .tsv, or .json")]
    Unsupported(String),
    #[error("Cannot infer the input format of {0:?}; pass --format csv or --format json")]
    Unknown(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

/// Resolves the input format from an explicit override or the file
/// extension. Spreadsheet formats are called out by name: they must be
/// exported to CSV before ingestion.
pub fn resolve_format(path: &Path, requested: Option<InputFormat>) -> Result<InputFormat> {
    if let Some(format) = requested {
        return Ok(format);
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("csv") | Some("tsv") => Ok(InputFormat::Csv),
        Some("json") => Ok(InputFormat::Json),
        Some(other) => Err(FormatError::Unsupported(other.to_string()).into()),
        None => Err(FormatError::Unknown(path.to_path_buf()).into()),
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .with_context(|| format!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Reads a header-driven CSV/TSV input into raw rows, typing cells where the
/// text is unambiguously numeric or boolean and leaving everything else as
/// strings.
pub fn read_rows(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Vec<RawRow>> {
    let text = read_decoded_text(path, encoding)?;
    rows_from_csv_text(&text, delimiter)
        .with_context(|| format!("Reading delimited rows from {path:?}"))
}

/// Reads and parses a JSON input into a payload value.
pub fn read_json(path: &Path) -> Result<Json> {
    let text = read_decoded_text(path, UTF_8)?;
    serde_json::from_str(&text).with_context(|| format!("Parsing JSON from {path:?}"))
}

fn read_decoded_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let mut bytes = Vec::new();
    if is_dash(path) {
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Reading from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut bytes)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    let (decoded, _, _) = encoding.decode(&bytes);
    Ok(decoded.into_owned())
}

fn rows_from_csv_text(text: &str, delimiter: u8) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers().context("Reading header row")?.clone();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Reading row {}", idx + 2))?;
        // Skip fully blank lines the way spreadsheet exports produce them.
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let mut row = RawRow::new();
        for (column, field) in headers.iter().zip(record.iter()) {
            row.push(column, dynamic_type(field));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Best-effort cell typing mirroring what header-driven decoders infer:
/// exact booleans, integers, and finite floats become typed values, the rest
/// stays text.
fn dynamic_type(field: &str) -> CellValue {
    match field {
        "true" => return CellValue::Boolean(true),
        "false" => return CellValue::Boolean(false),
        _ => {}
    }
    if let Ok(integer) = field.parse::<i64>() {
        return CellValue::Integer(integer);
    }
    if let Ok(float) = field.parse::<f64>() {
        if float.is_finite() && !field.trim().is_empty() {
            return CellValue::Float(float);
        }
    }
    CellValue::Text(field.to_string())
}
