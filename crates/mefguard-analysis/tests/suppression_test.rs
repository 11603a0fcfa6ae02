//! Inline suppression tests: ignore comments and warning pragmas, alone and
//! through the rule engine.

use std::path::Path;
use std::sync::Arc;

use mefguard_analysis::parsers::{CSharpParser, LanguageParser};
use mefguard_analysis::rules::{RuleEngine, SuppressionChecker};
use mefguard_analysis::semantic::{InterfaceCatalog, SyntacticModel};
use mefguard_core::config::AnalysisConfig;

const RULE: &str = "MefImportExceptionAnalyzer";

/// An ignore comment covers its own line and the next one.
#[test]
fn test_ignore_same_and_previous_line() {
    let checker = SuppressionChecker::new("// mefguard-ignore\nA();\nB(); // mefguard-ignore\nC();\n\nD();\n");
    assert!(checker.is_suppressed(1, RULE));
    assert!(checker.is_suppressed(2, RULE));
    assert!(checker.is_suppressed(3, RULE));
    assert!(checker.is_suppressed(4, RULE));
    assert!(!checker.is_suppressed(6, RULE));
}

/// An ignore comment with an id list only covers those ids.
#[test]
fn test_ignore_with_rule_list() {
    let checker = SuppressionChecker::new("/* mefguard-ignore CS0168, MefImportExceptionAnalyzer */\nA();\n// mefguard-ignore CS0168\nB();\n");
    assert!(checker.is_suppressed(2, RULE));
    assert!(!checker.is_suppressed(4, RULE));
    assert!(checker.is_suppressed(4, "CS0168"));
}

/// The marker inside a string literal does not suppress.
#[test]
fn test_marker_in_string_ignored() {
    let checker = SuppressionChecker::new("var s = \"mefguard-ignore\";\nA();\n");
    assert!(!checker.is_suppressed(2, RULE));
}

/// Pragma disable applies until a matching restore.
#[test]
fn test_pragma_region() {
    let source = "A();\n#pragma warning disable MefImportExceptionAnalyzer\nB();\n#pragma warning restore MefImportExceptionAnalyzer\nC();\n#pragma warning disable\nD();\n#pragma warning restore CS0168\nE();\n";
    let checker = SuppressionChecker::new(source);
    assert!(!checker.is_suppressed(1, RULE));
    assert!(checker.is_suppressed(3, RULE));
    assert!(!checker.is_suppressed(5, RULE));
    assert!(checker.is_suppressed(7, RULE));
    assert!(checker.is_suppressed(9, RULE));
}

/// Pragmas for other ids leave the rule active.
#[test]
fn test_pragma_other_ids() {
    let checker = SuppressionChecker::new("#pragma warning disable CS0168, CS0219\nA();\n");
    assert!(!checker.is_suppressed(2, RULE));
    assert!(checker.is_suppressed(2, "CS0219"));
}

fn analyze(source: &str, respect: bool) -> Vec<bool> {
    let unit = CSharpParser::new()
        .parse(source, Path::new("Demo.cs"))
        .unwrap();
    let model = SyntacticModel::new(Arc::new(InterfaceCatalog::from_trees([&unit.tree])));
    let engine = RuleEngine::from_config(&AnalysisConfig {
        respect_suppressions: Some(respect),
        ..Default::default()
    });
    engine
        .analyze_unit(&unit, &model)
        .diagnostics
        .iter()
        .map(|d| d.suppressed)
        .collect()
}

const SUPPRESSED_SOURCE: &str = r#"class A
{
    // mefguard-ignore
    [ImportingConstructor]
    public A(IBar bar) { Bar(); }
}

class B
{
#pragma warning disable MefImportExceptionAnalyzer
    [ImportingConstructor]
    public B(IBar bar) { Bar(); }
#pragma warning restore MefImportExceptionAnalyzer
}

class C
{
    [ImportingConstructor]
    public C(IBar bar) { Bar(); }
}
"#;

/// Suppressed diagnostics are reported with the flag set, not dropped.
#[test]
fn test_engine_marks_suppressed() {
    assert_eq!(analyze(SUPPRESSED_SOURCE, true), vec![true, true, false]);
}

/// Suppressions can be disabled in configuration.
#[test]
fn test_engine_ignores_suppressions_when_disabled() {
    assert_eq!(analyze(SUPPRESSED_SOURCE, false), vec![false, false, false]);
}
