//! Labeled blob rendering

use crate::domain::FileRecord;

/// Header line that opens each record.
pub fn record_header(relative_path: &str) -> String {
    format!("=== File: {} ===", relative_path)
}

/// Render records as `=== File: <path> ===` blocks joined by blank lines.
pub fn render_blob(records: &[FileRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}\n{}\n", record_header(&record.relative_path), record.content))
        .collect::<Vec<_>>()
        .join("\n")
}
