//! Property-based tests for the front end and the fixer.
//!
//! Uses proptest to fuzz-verify:
//!   - lowering reproduces any input byte for byte
//!   - a fixed constructor is never flagged again
//!   - imports are inserted at most once
//!   - fixing never changes parameter lists

use std::path::Path;
use std::sync::Arc;

use proptest::prelude::*;

use mefguard_analysis::declarations::DeclarationIndex;
use mefguard_analysis::fixes::{ensure_import, CodeFixProvider};
use mefguard_analysis::parsers::{CSharpParser, LanguageParser};
use mefguard_analysis::rules::RuleEngine;
use mefguard_analysis::semantic::{InterfaceCatalog, SyntacticModel};
use mefguard_core::traits::CancellationToken;

fn parse(source: &str) -> mefguard_analysis::SourceUnit {
    CSharpParser::new()
        .parse(source, Path::new("Prop.cs"))
        .unwrap()
}

fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{0,6}".prop_map(|name| format!("{name}();")),
        ("[a-z]{1,6}", 0i32..1000).prop_map(|(v, n)| format!("var {v}x = {n};")),
        "[a-z ]{0,12}".prop_map(|s| format!("Log(\"{s}\");")),
        Just("// note".to_string()),
        Just(";".to_string()),
    ]
}

fn constructor_source(params: &str, statements: &[String], indent: usize) -> String {
    let pad = " ".repeat(indent);
    let body: String = statements
        .iter()
        .map(|s| format!("{pad}{pad}{pad}{s}\n"))
        .collect();
    format!(
        "namespace Prop\n{{\n{pad}class Foo\n{pad}{{\n{pad}{pad}[ImportingConstructor]\n{pad}{pad}public Foo({params})\n{pad}{pad}{{\n{body}{pad}{pad}}}\n{pad}}}\n}}\n"
    )
}

fn params() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("IBar bar".to_string()),
        Just("IBar  bar, int count = 3".to_string()),
        Just(" List<string> names ,ref int x ".to_string()),
    ]
}

proptest! {
    /// Lowering is lossless for arbitrary printable text, valid C# or not.
    #[test]
    fn prop_lowering_is_lossless(s in "[ -~\t\n]{0,200}") {
        let unit = parse(&s);
        prop_assert_eq!(unit.tree.text(), s);
    }

    /// Lowering is lossless for C#-shaped input with odd spacing.
    #[test]
    fn prop_lowering_is_lossless_for_code(
        stmts in prop::collection::vec(statement(), 0..8),
        p in params(),
        indent in 0usize..5,
    ) {
        let source = constructor_source(&p, &stmts, indent);
        prop_assert_eq!(parse(&source).tree.text(), source);
    }

    /// A fixed constructor is not flagged again, in memory or after
    /// re-parsing, and its parameter list is unchanged.
    #[test]
    fn prop_fix_is_idempotent(
        stmts in prop::collection::vec(statement(), 1..6),
        p in params(),
        indent in 1usize..5,
    ) {
        let source = constructor_source(&p, &stmts, indent);
        let unit = parse(&source);
        let model = SyntacticModel::new(Arc::new(InterfaceCatalog::new()));
        let engine = RuleEngine::default();
        let before = engine.analyze(&unit.tree, "Prop.cs", &model);

        // Comment-only and empty bodies are exempt and have nothing to fix.
        let real = stmts.iter().any(|s| !s.starts_with("//"));
        prop_assert_eq!(before.diagnostics.len(), usize::from(real));
        if !real {
            return Ok(());
        }

        let fixed = CodeFixProvider::default()
            .fix(&unit.tree, &before.diagnostics[0], &CancellationToken::new())
            .unwrap();
        prop_assert!(engine.analyze(&fixed, "Prop.cs", &model).diagnostics.is_empty());

        let reparsed = parse(&fixed.text());
        prop_assert!(engine.analyze(&reparsed.tree, "Prop.cs", &model).diagnostics.is_empty());

        let old = DeclarationIndex::build(&unit.tree);
        let new = DeclarationIndex::build(&fixed);
        prop_assert_eq!(
            old.constructors[0].parameter_list().map(|l| l.full_text()),
            new.constructors[0].parameter_list().map(|l| l.full_text())
        );
    }

    /// Ensuring an import twice equals ensuring it once.
    #[test]
    fn prop_import_dedup(ns in "[A-Z][a-z]{1,5}(\\.[A-Z][a-z]{1,5}){0,3}") {
        let unit = parse("using System.IO;\n\nclass A { }\n");
        let once = ensure_import(&unit.tree, &ns, "\n");
        let twice = ensure_import(&once, &ns, "\n");
        prop_assert_eq!(once.text().matches(&format!("using {ns};")).count(), 1);
        prop_assert_eq!(once, twice);
    }
}
