//! # mefguard-analysis
//!
//! Analysis engine for mefguard.
//! Contains the owned syntax tree, the C# front end, the rule passes,
//! the try/catch fixer, the scanner, reporters, and the project pipeline.

pub mod declarations;
pub mod fixes;
pub mod normalize;
pub mod parsers;
pub mod pipeline;
pub mod reporters;
pub mod rules;
pub mod scanner;
pub mod semantic;
pub mod syntax;

pub use fixes::{CodeFixProvider, FixProfile, TreeRewriter};
pub use parsers::{CSharpParser, LanguageParser, SourceUnit};
pub use pipeline::{Pipeline, ProjectReport, RunMode};
pub use rules::{AnalysisReport, Diagnostic, RuleEngine};
pub use semantic::{InterfaceCatalog, SemanticModel, SyntacticModel};
pub use syntax::SyntaxTree;
