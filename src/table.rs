//! Terminal rendering of a canonical record as an aligned text table.

use std::fmt::Write as _;

use crate::{record::CanonicalRecord, vocab::Section};

const MISSING_MARKER: &str = "(missing)";

/// Renders one line per required metric, in declaration order, followed by
/// any extra metrics a section happens to carry. Absent required fields show
/// a missing marker so the table doubles as a readiness view.
pub fn render_record(record: &CanonicalRecord) -> String {
    let mut rows: Vec<[String; 3]> = Vec::new();
    for section in Section::ALL {
        let fields = record.section(section);
        for metric in section.metrics() {
            let value = fields
                .get(*metric)
                .map(|value| value.to_string())
                .unwrap_or_else(|| MISSING_MARKER.to_string());
            rows.push([section.to_string(), (*metric).to_string(), value]);
        }
        for (metric, value) in fields {
            if !section.metrics().contains(&metric.as_str()) {
                rows.push([section.to_string(), metric.clone(), value.to_string()]);
            }
        }
    }

    let headers = ["section", "metric", "value"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    write_row(&mut output, &headers.map(String::from), &widths);
    let separator = widths.map(|w| "-".repeat(w));
    write_row(&mut output, &separator, &widths);
    for row in &rows {
        write_row(&mut output, row, &widths);
    }
    output
}

pub fn print_record(record: &CanonicalRecord) {
    print!("{}", render_record(record));
}

fn write_row(output: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let _ = writeln!(
        output,
        "{:<w0$}  {:<w1$}  {:<w2$}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
}
