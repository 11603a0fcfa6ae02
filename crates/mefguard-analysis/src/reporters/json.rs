//! JSON reporter: structured output.

use serde_json::json;

use super::Reporter;
use crate::rules::Diagnostic;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, diagnostics: &[Diagnostic]) -> Result<String, String> {
        let items: Vec<serde_json::Value> = diagnostics
            .iter()
            .map(|d| {
                json!({
                    "rule_id": d.rule_id,
                    "severity": d.severity,
                    "message": d.message,
                    "file": d.location.file,
                    "line": d.location.line,
                    "column": d.location.column,
                    "end_line": d.location.end_line,
                    "end_column": d.location.end_column,
                    "span": { "start": d.location.span.start, "end": d.location.span.end },
                    "suppressed": d.suppressed,
                })
            })
            .collect();

        let active = diagnostics.iter().filter(|d| !d.suppressed).count();
        let output = json!({
            "total": diagnostics.len(),
            "active": active,
            "diagnostics": items,
        });
        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
