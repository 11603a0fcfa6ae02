//! Code fix: wrap a flagged declaration's body in a logging try/catch.

pub mod imports;
pub mod rewriter;
pub mod signature;
pub mod try_catch;

pub use imports::ensure_import;
pub use rewriter::TreeRewriter;
pub use try_catch::{CatchMessage, TryCatchTemplate};

use std::sync::Arc;

use mefguard_core::config::{FixConfig, FixVariant, FormatConfig, MefGuardConfig, RelocationStrategy};
use mefguard_core::constants;
use mefguard_core::errors::RewriteError;
use mefguard_core::traits::Cancellable;

use crate::declarations::MethodLike;
use crate::normalize::FormatOptions;
use crate::parsers::SourceUnit;
use crate::rules::{Diagnostic, RuleEngine};
use crate::semantic::SemanticModel;
use crate::syntax::{kinds, SyntaxNode, SyntaxTree};

/// What a fix variant produces and which declarations it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixProfile {
    pub variant: FixVariant,
    pub template: TryCatchTemplate,
    /// Ensured in order after the body is rewritten.
    pub namespaces: Vec<String>,
    /// Whether ordinary methods are fixable, not only constructors.
    pub fix_methods: bool,
}

impl FixProfile {
    pub fn constructor_only() -> Self {
        Self {
            variant: FixVariant::ConstructorOnly,
            template: TryCatchTemplate {
                logger_call: constants::LOGGER_CALL.to_string(),
                catch_variable: constants::CATCH_VARIABLE.to_string(),
                exception_type: constants::CATCH_EXCEPTION_TYPE.to_string(),
                message: CatchMessage::Literal(constants::CONSTRUCTOR_FIX_MESSAGE.to_string()),
            },
            namespaces: vec![
                constants::ERROR_NOTIFICATION_NAMESPACE.to_string(),
                constants::SYSTEM_NAMESPACE.to_string(),
            ],
            fix_methods: false,
        }
    }

    pub fn callback_aware() -> Self {
        Self {
            variant: FixVariant::CallbackAware,
            template: TryCatchTemplate {
                message: CatchMessage::ExceptionMessage,
                ..Self::constructor_only().template
            },
            namespaces: vec![constants::SYSTEM_NAMESPACE.to_string()],
            fix_methods: true,
        }
    }

    pub fn for_variant(variant: FixVariant) -> Self {
        match variant {
            FixVariant::ConstructorOnly => Self::constructor_only(),
            FixVariant::CallbackAware => Self::callback_aware(),
        }
    }

    /// Preset for the configured variant with configured names applied.
    pub fn from_config(config: &FixConfig) -> Self {
        let mut profile = Self::for_variant(config.effective_variant());
        profile.template.logger_call = config.effective_logger_call().to_string();
        profile.template.catch_variable = config.effective_catch_variable().to_string();
        profile.template.exception_type = config.effective_exception_type().to_string();
        if let CatchMessage::Literal(text) = &mut profile.template.message {
            *text = config.effective_message().to_string();
        }
        profile
    }

    fn accepts(&self, decl: &MethodLike<'_>) -> bool {
        decl.is_constructor() || self.fix_methods
    }
}

/// Outcome of a batch fix over one unit.
#[derive(Debug)]
pub struct FixAllOutcome {
    pub tree: SyntaxTree,
    pub applied: usize,
    /// Fixes that were attempted and aborted; their declarations are unchanged.
    pub failures: Vec<RewriteError>,
    pub cancelled: bool,
}

impl FixAllOutcome {
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

pub struct CodeFixProvider {
    profile: FixProfile,
    format: FormatConfig,
    relocation: RelocationStrategy,
}

impl Default for CodeFixProvider {
    fn default() -> Self {
        Self::new(FixProfile::callback_aware())
    }
}

impl CodeFixProvider {
    pub fn new(profile: FixProfile) -> Self {
        Self {
            profile,
            format: FormatConfig::default(),
            relocation: RelocationStrategy::default(),
        }
    }

    pub fn from_config(config: &MefGuardConfig) -> Self {
        Self {
            profile: FixProfile::from_config(&config.fix),
            format: config.format.clone(),
            relocation: config.fix.effective_relocation(),
        }
    }

    pub fn with_relocation(mut self, relocation: RelocationStrategy) -> Self {
        self.relocation = relocation;
        self
    }

    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }

    pub fn profile(&self) -> &FixProfile {
        &self.profile
    }

    pub fn title(&self) -> &'static str {
        constants::FIX_TITLE
    }

    pub fn fixable_rule_ids(&self) -> &'static [&'static str] {
        &[constants::RULE_ID]
    }

    /// Apply the fix for one diagnostic and return the new tree.
    pub fn fix(
        &self,
        tree: &SyntaxTree,
        diagnostic: &Diagnostic,
        cancel: &dyn Cancellable,
    ) -> Result<SyntaxTree, RewriteError> {
        if cancel.is_cancelled() {
            return Err(RewriteError::Cancelled);
        }
        if !self.fixable_rule_ids().contains(&diagnostic.rule_id.as_str()) {
            return Err(RewriteError::NotFixable {
                rule_id: diagnostic.rule_id.clone(),
            });
        }

        let offset = diagnostic.location.span.start;
        let target = find_declaration(tree, offset)?;
        let decl = MethodLike::from_node(&target).ok_or_else(|| RewriteError::UnsupportedTarget {
            kind: target.kind().to_string(),
        })?;
        if !self.profile.accepts(&decl) {
            return Err(RewriteError::UnsupportedTarget {
                kind: target.kind().to_string(),
            });
        }
        let body = decl.body().ok_or_else(|| RewriteError::MissingBody {
            name: decl.name().unwrap_or(decl.kind_name()).to_string(),
        })?;
        let replacement = self.profile.template.build(body);

        let source = tree.text();
        let format = FormatOptions::from_config(&self.format, &source);
        let rewriter = TreeRewriter::new(format, self.relocation);
        let mut fixed = rewriter.rewrite(tree, target.id(), replacement)?;
        for namespace in &self.profile.namespaces {
            fixed = ensure_import(&fixed, namespace, &rewriter.format().eol);
        }
        tracing::info!(
            file = %diagnostic.location.file,
            line = diagnostic.location.line,
            variant = %self.profile.variant,
            "applied fix"
        );
        Ok(fixed)
    }

    /// Reapply [`fix`](Self::fix) diagnostic by diagnostic until no fixable,
    /// unsuppressed diagnostic is left, re-analysing after each step.
    pub fn fix_all(
        &self,
        unit: &SourceUnit,
        engine: &RuleEngine,
        model: &dyn SemanticModel,
        cancel: &dyn Cancellable,
    ) -> FixAllOutcome {
        let file = unit.file_name();
        let is_fixable = |d: &&Diagnostic| self.fixable_rule_ids().contains(&d.rule_id.as_str());
        let initial = engine
            .analyze(&unit.tree, &file, model)
            .active()
            .filter(is_fixable)
            .count();

        let mut outcome = FixAllOutcome {
            tree: unit.tree.clone(),
            applied: 0,
            failures: Vec::new(),
            cancelled: false,
        };
        for _ in 0..initial {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            let report = engine.analyze(&outcome.tree, &file, model);
            // Failed declarations are unchanged and keep their order, so they
            // are always the first `failures.len()` candidates.
            let Some(next) = report
                .active()
                .filter(is_fixable)
                .nth(outcome.failures.len())
            else {
                break;
            };
            match self.fix(&outcome.tree, next, cancel) {
                Ok(tree) => {
                    outcome.tree = tree;
                    outcome.applied += 1;
                }
                Err(RewriteError::Cancelled) => {
                    outcome.cancelled = true;
                    break;
                }
                Err(e) => {
                    tracing::error!(file = %file, line = next.location.line, error = %e, "fix aborted");
                    outcome.failures.push(e);
                }
            }
        }
        tracing::debug!(file = %file, applied = outcome.applied, "fix-all finished");
        outcome
    }
}

/// Innermost constructor or method enclosing the token at `offset`.
fn find_declaration(tree: &SyntaxTree, offset: usize) -> Result<Arc<SyntaxNode>, RewriteError> {
    let found = tree
        .token_at_offset(offset)
        .ok_or(RewriteError::NoDeclaration { offset })?;
    found
        .ancestors
        .iter()
        .rev()
        .find(|n| {
            matches!(
                n.kind(),
                kinds::CONSTRUCTOR_DECLARATION | kinds::METHOD_DECLARATION
            )
        })
        .map(|&n| Arc::clone(n))
        .ok_or(RewriteError::NoDeclaration { offset })
}
