//! The two rule passes.
//!
//! Pass A flags constructors carrying the injection marker. Pass B flags
//! ordinary methods that implement a member of a host interface. Both skip
//! bodies that are empty or already a single `try` statement.

use mefguard_core::config::AnalysisConfig;

use super::matcher::{
    has_injection_marker, implemented_interfaces_with_prefix, is_concrete_implementation_of,
    is_ordinary_method,
};
use super::predicates::{is_empty_body, is_single_try_catch_body};
use super::suppression::SuppressionChecker;
use super::types::{AnalysisReport, Diagnostic, Location, RuleDescriptor};
use crate::declarations::{ClassDecl, DeclarationIndex, MethodLike};
use crate::parsers::SourceUnit;
use crate::semantic::SemanticModel;
use crate::syntax::{LineIndex, SpanIndex, SyntaxTree, TextRange};

/// Runs both passes over one source unit.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    descriptor: RuleDescriptor,
    marker: String,
    interface_prefix: String,
    constructor_rule: bool,
    callback_rule: bool,
    respect_suppressions: bool,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

/// Per-unit state shared by both passes.
struct UnitContext<'a> {
    file: &'a str,
    spans: SpanIndex,
    lines: LineIndex,
}

impl UnitContext<'_> {
    fn location(&self, span: TextRange) -> Location {
        let (line, column) = self.lines.line_col(span.start);
        let (end_line, end_column) = self.lines.line_col(span.end);
        Location {
            file: self.file.to_string(),
            span,
            line,
            column,
            end_line,
            end_column,
        }
    }
}

impl RuleEngine {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            descriptor: RuleDescriptor::MEF_IMPORT_EXCEPTION,
            marker: config.effective_marker_attribute().to_string(),
            interface_prefix: config.effective_interface_prefix().to_string(),
            constructor_rule: config.effective_constructor_rule(),
            callback_rule: config.effective_callback_rule(),
            respect_suppressions: config.effective_respect_suppressions(),
        }
    }

    pub fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    pub fn analyze_unit(&self, unit: &SourceUnit, model: &dyn SemanticModel) -> AnalysisReport {
        self.analyze(&unit.tree, &unit.file_name(), model)
    }

    /// Diagnostics for `tree`, sorted by span start.
    pub fn analyze(
        &self,
        tree: &SyntaxTree,
        file: &str,
        model: &dyn SemanticModel,
    ) -> AnalysisReport {
        let text = tree.text();
        let ctx = UnitContext {
            file,
            spans: tree.span_index(),
            lines: LineIndex::new(&text),
        };
        let index = DeclarationIndex::build(tree);
        let mut report = AnalysisReport::default();

        if self.constructor_rule {
            for ctor in &index.constructors {
                if self.constructor_needs_protection(ctor) {
                    self.emit_constructor(&ctx, ctor, &mut report);
                }
            }
        }

        if self.callback_rule {
            for class in &index.classes {
                self.check_class(&ctx, class, model, &mut report);
            }
        }

        if self.respect_suppressions && !report.diagnostics.is_empty() {
            let checker = SuppressionChecker::new(&text);
            for diagnostic in &mut report.diagnostics {
                diagnostic.suppressed =
                    checker.is_suppressed(diagnostic.location.line, &diagnostic.rule_id);
            }
        }

        report.diagnostics.sort_by_key(|d| d.location.span);
        tracing::debug!(
            file,
            diagnostics = report.diagnostics.len(),
            errors = report.errors.len(),
            "analysed unit"
        );
        report
    }

    fn constructor_needs_protection(&self, ctor: &MethodLike<'_>) -> bool {
        if !has_injection_marker(ctor, &self.marker) {
            return false;
        }
        if ctor.body().is_none() {
            tracing::trace!(ctor = ?ctor.name(), "marked constructor has no block body");
            return false;
        }
        !is_empty_body(Some(ctor)) && !is_single_try_catch_body(Some(ctor))
    }

    fn emit_constructor(
        &self,
        ctx: &UnitContext<'_>,
        ctor: &MethodLike<'_>,
        report: &mut AnalysisReport,
    ) {
        match ctx.spans.get(&ctor.node().id()) {
            Some(span) => report.diagnostics.push(self.diagnostic(ctx, span.trimmed)),
            None => report.errors.push(missing_span(ctor)),
        }
    }

    fn check_class(
        &self,
        ctx: &UnitContext<'_>,
        class: &ClassDecl<'_>,
        model: &dyn SemanticModel,
        report: &mut AnalysisReport,
    ) {
        let interfaces = implemented_interfaces_with_prefix(model, class, &self.interface_prefix);
        if interfaces.is_empty() {
            return;
        }
        let members: Vec<_> = interfaces.iter().flat_map(|i| &i.members).collect();

        for method in class.methods().iter().filter(|m| is_ordinary_method(m)) {
            if method.body().is_none()
                || is_empty_body(Some(method))
                || is_single_try_catch_body(Some(method))
            {
                continue;
            }
            match is_concrete_implementation_of(model, class, method, members.iter().copied()) {
                Ok(true) => match self.name_span(ctx, method) {
                    Some(span) => report.diagnostics.push(self.diagnostic(ctx, span)),
                    None => report.errors.push(missing_span(method)),
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        class = %class.qualified_name(),
                        method = ?method.name(),
                        error = %e,
                        "implementation lookup failed, skipping method"
                    );
                    report.errors.push(e);
                }
            }
        }
    }

    /// Span of the declared name token.
    fn name_span(&self, ctx: &UnitContext<'_>, method: &MethodLike<'_>) -> Option<TextRange> {
        let node = method.node();
        let span = ctx.spans.get(&node.id())?;
        let (index, token) = method.name_token()?;
        let start = span.full.start + node.child_offset(index) + token.leading_len();
        Some(TextRange::new(start, start + token.text.len()))
    }

    fn diagnostic(&self, ctx: &UnitContext<'_>, span: TextRange) -> Diagnostic {
        Diagnostic {
            rule_id: self.descriptor.id.to_string(),
            severity: self.descriptor.severity,
            message: self.descriptor.message.to_string(),
            location: ctx.location(span),
            suppressed: false,
        }
    }
}

fn missing_span(decl: &MethodLike<'_>) -> mefguard_core::errors::DetectionError {
    mefguard_core::errors::DetectionError::MissingSpan {
        declaration: decl.name().unwrap_or(decl.kind_name()).to_string(),
    }
}
