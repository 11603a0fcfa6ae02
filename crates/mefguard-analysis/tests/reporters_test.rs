//! Reporter output tests.

use mefguard_analysis::reporters::console::ConsoleReporter;
use mefguard_analysis::reporters::{available_formats, create_reporter, Reporter};
use mefguard_analysis::rules::{Diagnostic, Location, Severity};
use mefguard_analysis::syntax::TextRange;

fn diagnostic(line: u32, suppressed: bool) -> Diagnostic {
    Diagnostic {
        rule_id: "MefImportExceptionAnalyzer".to_string(),
        severity: Severity::Error,
        message: "There's a MEF ImportingConstructor without a try..catch block .".to_string(),
        location: Location {
            file: "src/Foo.cs".to_string(),
            span: TextRange::new(120, 180),
            line,
            column: 9,
            end_line: line + 3,
            end_column: 10,
        },
        suppressed,
    }
}

/// Console output without color is one line per diagnostic plus a summary.
#[test]
fn test_console_plain() {
    let reporter = ConsoleReporter::new(false);
    let out = reporter
        .generate(&[diagnostic(7, false), diagnostic(20, true)])
        .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        "src/Foo.cs:7:9: error MefImportExceptionAnalyzer: There's a MEF ImportingConstructor without a try..catch block ."
    );
    assert!(lines[1].ends_with(" [suppressed]"));
    assert_eq!(lines[2], "1 diagnostic(s), 1 suppressed");
}

/// Colored console output wraps the severity in ANSI escapes.
#[test]
fn test_console_color() {
    let out = ConsoleReporter::new(true)
        .generate(&[diagnostic(7, false)])
        .unwrap();
    assert!(out.contains("\x1b[31merror\x1b[0m"));
}

/// JSON output carries counts and every location field.
#[test]
fn test_json_structure() {
    let reporter = create_reporter("json").unwrap();
    assert_eq!(reporter.name(), "json");
    let out = reporter
        .generate(&[diagnostic(7, false), diagnostic(20, true)])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["total"], 2);
    assert_eq!(value["active"], 1);
    let first = &value["diagnostics"][0];
    assert_eq!(first["rule_id"], "MefImportExceptionAnalyzer");
    assert_eq!(first["severity"], "error");
    assert_eq!(first["file"], "src/Foo.cs");
    assert_eq!(first["line"], 7);
    assert_eq!(first["end_line"], 10);
    assert_eq!(first["span"]["start"], 120);
    assert_eq!(first["suppressed"], false);
    assert_eq!(value["diagnostics"][1]["suppressed"], true);
}

/// An empty report is still valid output.
#[test]
fn test_empty_reports() {
    let json = create_reporter("json").unwrap().generate(&[]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total"], 0);
    let console = ConsoleReporter::new(false).generate(&[]).unwrap();
    assert_eq!(console, "0 diagnostic(s), 0 suppressed\n");
}

/// Unknown formats yield no reporter.
#[test]
fn test_reporter_factory() {
    assert_eq!(available_formats(), &["console", "json"]);
    for format in available_formats() {
        assert_eq!(create_reporter(format).unwrap().name(), *format);
    }
    assert!(create_reporter("sarif").is_none());
}
