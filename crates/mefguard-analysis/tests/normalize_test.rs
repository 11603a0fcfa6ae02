//! Whitespace normalization tests.

use std::path::Path;

use mefguard_analysis::normalize::{normalize_whitespace, FormatOptions};
use mefguard_analysis::parsers::{CSharpParser, LanguageParser};
use mefguard_analysis::syntax::{kinds, TrackingMarker};
use mefguard_analysis::SyntaxTree;

fn tree(source: &str) -> SyntaxTree {
    CSharpParser::new()
        .parse(source, Path::new("Demo.cs"))
        .unwrap()
        .tree
}

fn normalize(source: &str) -> String {
    normalize_whitespace(&tree(source), &FormatOptions::default()).text()
}

/// Cramped code is laid out with Allman braces and one statement per line.
#[test]
fn test_allman_layout() {
    let out = normalize("class A{void M(int a,int b){if(a>b){X(a);}Y();}}");
    assert_eq!(
        out,
        "class A\n{\n    void M(int a, int b)\n    {\n        if (a > b)\n        {\n            X(a);\n        }\n        Y();\n    }\n}"
    );
}

/// Normalizing twice gives the same text.
#[test]
fn test_normalization_is_stable() {
    let source = "namespace N { class A { [ImportingConstructor] public A(IBar b) { try { B(); } catch (Exception e) { L(e); } } } }";
    let once = normalize(source);
    assert_eq!(normalize(&once), once);
}

/// Comments survive and line comments end their line.
#[test]
fn test_comments_kept() {
    let out = normalize("class A { void M() { // note\n X(); /* inline */ Y(); } }");
    assert!(out.contains("// note\n"));
    assert!(out.contains("/* inline */"));
    assert!(out.contains("X();"));
}

/// String literal contents are never reformatted.
#[test]
fn test_string_literal_kept() {
    let out = normalize("class A { void M() { X(\"a  {  b\"); } }");
    assert!(out.contains("X(\"a  {  b\");"));
}

/// Attribute lists on declarations stand on their own line.
#[test]
fn test_attribute_on_own_line() {
    let out = normalize("class A { [ImportingConstructor] public A() { } }");
    assert!(out.contains("    [ImportingConstructor]\n    public A()\n"));
}

/// Tracking markers survive normalization while node ids are fresh.
#[test]
fn test_markers_survive() {
    let source = tree("class A { void M() { X(); } }");
    let method = source
        .nodes()
        .into_iter()
        .find(|n| n.kind() == kinds::METHOD_DECLARATION)
        .unwrap();
    let marker = TrackingMarker::fresh();
    let marked = source
        .replace_node(method.id(), method.with_marker(marker))
        .unwrap();
    let old_id = marked.find_by_marker(marker)[0].id();

    let normalized = normalize_whitespace(&marked, &FormatOptions::default());
    let found = normalized.find_by_marker(marker);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind(), kinds::METHOD_DECLARATION);
    assert_ne!(found[0].id(), old_id);
}

/// Configured indentation and line breaks are used.
#[test]
fn test_custom_options() {
    let options = FormatOptions {
        indent_unit: "\t".to_string(),
        eol: "\r\n".to_string(),
    };
    let out = normalize_whitespace(&tree("class A { void M() { } }"), &options).text();
    assert_eq!(out, "class A\r\n{\r\n\tvoid M()\r\n\t{\r\n\t}\r\n}");
}

/// A directive line is followed by exactly one line break.
#[test]
fn test_directive_no_blank_line() {
    let source = "class A\n{\n    void M()\n    {\n        #region r\n        Foo();\n        #endregion\n        Bar();\n    }\n}\n";
    let out = normalize(source);
    assert!(!out.contains("\n\n"), "unexpected blank line in {out:?}");
    assert!(out.contains("#region r\n        Foo();"));
    assert!(out.contains("#endregion\n        Bar();"));
    assert_eq!(normalize(&out), out);
}
