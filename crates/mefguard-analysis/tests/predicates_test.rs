//! Predicate and matcher tests: body shapes, the injection marker, interface
//! prefix filtering and implementation lookup.

use std::path::Path;
use std::sync::Arc;

use mefguard_analysis::declarations::DeclarationIndex;
use mefguard_analysis::parsers::{CSharpParser, LanguageParser, SourceUnit};
use mefguard_analysis::rules::matcher::{
    has_injection_marker, implemented_interfaces_with_prefix, is_concrete_implementation_of,
    is_ordinary_method,
};
use mefguard_analysis::rules::predicates::{is_empty_body, is_single_try_catch_body};
use mefguard_analysis::semantic::{InterfaceCatalog, SyntacticModel};

fn parse(source: &str) -> SourceUnit {
    CSharpParser::new()
        .parse(source, Path::new("Shapes.cs"))
        .unwrap()
}

fn ctor_source(body: &str) -> String {
    format!("class A\n{{\n    [ImportingConstructor]\n    public A()\n    {body}\n}}\n")
}

/// (empty, single try) for the first constructor of `source`.
fn shapes(source: &str) -> (bool, bool) {
    let unit = parse(source);
    let index = DeclarationIndex::build(&unit.tree);
    let ctor = index.constructors.first();
    (is_empty_body(ctor), is_single_try_catch_body(ctor))
}

/// An empty block is empty and is not a try.
#[test]
fn test_empty_block() {
    assert_eq!(shapes(&ctor_source("{\n    }")), (true, false));
}

/// Comments are trivia, not statements.
#[test]
fn test_comment_only_block_is_empty() {
    let body = "{\n        // nothing yet\n        /* later */\n    }";
    assert_eq!(shapes(&ctor_source(body)), (true, false));
}

/// An empty statement counts as a statement.
#[test]
fn test_empty_statement_is_not_empty() {
    assert_eq!(shapes(&ctor_source("{\n        ;\n    }")), (false, false));
}

/// A lone try statement matches whatever its catch clauses hold.
#[test]
fn test_single_try() {
    let body = "{\n        try\n        {\n            Run();\n        }\n        finally\n        {\n        }\n    }";
    assert_eq!(shapes(&ctor_source(body)), (false, true));
}

/// A try followed by another statement is not a single try.
#[test]
fn test_try_plus_statement() {
    let body = "{\n        try { Run(); } catch (Exception) { }\n        Done();\n    }";
    assert_eq!(shapes(&ctor_source(body)), (false, false));
}

/// Without a block body both predicates are false.
#[test]
fn test_expression_body_and_absent_declaration() {
    let source = "class A\n{\n    public A() => Run();\n}\n";
    assert_eq!(shapes(source), (false, false));
    assert!(!is_empty_body(None));
    assert!(!is_single_try_catch_body(None));
}

/// The marker matches by exact attribute name only.
#[test]
fn test_injection_marker_exact_name() {
    let source = "class A\n{\n    [ImportingConstructor]\n    public A() { }\n    [ImportingConstructorAttribute]\n    public A(int x) { }\n    [Obsolete, ImportingConstructor]\n    public A(string s) { }\n}\n";
    let unit = parse(source);
    let index = DeclarationIndex::build(&unit.tree);
    let found: Vec<bool> = index
        .constructors
        .iter()
        .map(|c| has_injection_marker(c, "ImportingConstructor"))
        .collect();
    assert_eq!(found, vec![true, false, true]);
}

const HOST_SOURCE: &str = r#"namespace Microsoft.VisualStudio.Shell
{
    public interface IVsPing
    {
        void Ping();
    }
}

namespace Other
{
    public interface IOther
    {
        void Ping();
    }
}

namespace Demo
{
    using Microsoft.VisualStudio.Shell;
    using Other;

    public class Host : IVsPing, IOther
    {
        public void Ping() { }

        void IOther.Ping() { }

        public void Helper() { }
    }
}
"#;

/// Only interfaces under the prefix are returned.
#[test]
fn test_interfaces_with_prefix() {
    let unit = parse(HOST_SOURCE);
    let model = SyntacticModel::new(Arc::new(InterfaceCatalog::from_trees([&unit.tree])));
    let index = DeclarationIndex::build(&unit.tree);
    let host = index.classes.iter().find(|c| c.name == "Host").unwrap();

    let found = implemented_interfaces_with_prefix(&model, host, "Microsoft.VisualStudio.");
    let names: Vec<&str> = found.iter().map(|s| s.display.as_str()).collect();
    assert_eq!(names, vec!["Microsoft.VisualStudio.Shell.IVsPing"]);
}

/// Implementation lookup picks the public method for the host interface,
/// and explicit implementations are not ordinary methods.
#[test]
fn test_concrete_implementation_and_ordinary_methods() {
    let unit = parse(HOST_SOURCE);
    let model = SyntacticModel::new(Arc::new(InterfaceCatalog::from_trees([&unit.tree])));
    let index = DeclarationIndex::build(&unit.tree);
    let host = index.classes.iter().find(|c| c.name == "Host").unwrap();
    let interfaces = implemented_interfaces_with_prefix(&model, host, "Microsoft.VisualStudio.");
    let members = &interfaces[0].members;

    let methods = host.methods();
    assert_eq!(methods.len(), 3);
    let implements: Vec<bool> = methods
        .iter()
        .map(|m| is_concrete_implementation_of(&model, host, m, members).unwrap())
        .collect();
    assert_eq!(implements, vec![true, false, false]);

    let ordinary: Vec<bool> = methods.iter().map(is_ordinary_method).collect();
    assert_eq!(ordinary, vec![true, false, true]);

    let ctor_unit = parse("class B\n{\n    public B() { }\n}\n");
    let ctor_index = DeclarationIndex::build(&ctor_unit.tree);
    assert!(!is_ordinary_method(&ctor_index.constructors[0]));
}
