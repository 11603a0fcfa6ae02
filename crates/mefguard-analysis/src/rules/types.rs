//! Core types for the rule engine.

use std::fmt;

use mefguard_core::errors::DetectionError;
use serde::{Deserialize, Serialize};

use crate::syntax::TextRange;

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// Where a diagnostic points. Lines and columns are 1-based, columns in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub span: TextRange,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// One finding. Both rule passes produce the same descriptor, so nothing
/// here says which pass fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    /// Set by `// mefguard-ignore` or `#pragma warning disable`.
    pub suppressed: bool,
}

/// Static metadata shared by every diagnostic of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub severity: Severity,
}

impl RuleDescriptor {
    pub const MEF_IMPORT_EXCEPTION: RuleDescriptor = RuleDescriptor {
        id: mefguard_core::constants::RULE_ID,
        title: mefguard_core::constants::RULE_TITLE,
        message: mefguard_core::constants::RULE_MESSAGE,
        description: mefguard_core::constants::RULE_DESCRIPTION,
        category: mefguard_core::constants::RULE_CATEGORY,
        severity: Severity::Error,
    };
}

/// Diagnostics for one source unit plus the per-declaration failures that
/// did not stop the rest of the analysis.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub diagnostics: Vec<Diagnostic>,
    pub errors: Vec<DetectionError>,
}

impl AnalysisReport {
    /// Diagnostics not silenced by a suppression comment or pragma.
    pub fn active(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.suppressed)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}
