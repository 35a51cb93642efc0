//! Summary report and JSON report generation.

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::domain::TraversalResult;
use crate::patterns::PatternSet;

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// The plain-text summary printed after a run.
pub fn summary_report(result: &TraversalResult) -> String {
    let mut lines = vec![
        "Summary Report:".to_string(),
        format!("Total files processed: {}", result.processed),
        format!("Total files excluded: {}", result.excluded),
        format!("Total files in project: {}", result.total()),
    ];
    if !result.unreadable.is_empty() {
        lines.push(format!("Total files unreadable: {}", result.unreadable.len()));
    }
    format!("{}\n", lines.join("\n"))
}

pub fn report_value(root: &Path, patterns: &PatternSet, result: &TraversalResult) -> Value {
    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    report.insert("root".to_string(), Value::String(root.display().to_string()));
    report.insert(
        "stats".to_string(),
        json!({
            "processed": result.processed,
            "excluded": result.excluded,
            "unreadable": result.unreadable.len(),
            "total": result.total(),
        }),
    );
    report.insert("patterns".to_string(), json!(patterns.as_strings()));
    report.insert(
        "files".to_string(),
        json!(result.records.iter().map(|r| r.relative_path.as_str()).collect::<Vec<_>>()),
    );
    report.insert("unreadable_files".to_string(), json!(result.unreadable));
    Value::Object(report)
}

pub fn write_report(
    report_path: &Path,
    root: &Path,
    patterns: &PatternSet,
    result: &TraversalResult,
) -> Result<()> {
    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let value = report_value(root, patterns, result);
    std::fs::write(report_path, serde_json::to_string_pretty(&value)?)
        .with_context(|| format!("Failed writing report: {}", report_path.display()))?;
    Ok(())
}
