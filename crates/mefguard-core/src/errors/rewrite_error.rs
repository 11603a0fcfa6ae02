//! Rewrite errors.

use super::error_code::{self, ErrorCode};

/// Errors that abort a single fix invocation.
///
/// None of these are user-facing diagnostics: they signal a broken contract
/// inside the rewrite (stale node, non-unique marker) and the host is expected
/// to log and skip the fix.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Re-identification by {strategy} found {matches} nodes (expected exactly one)")]
    Relocation { strategy: String, matches: usize },

    #[error("Node {id} not found in tree")]
    NodeNotFound { id: u64 },

    #[error("No declaration at offset {offset}")]
    NoDeclaration { offset: usize },

    #[error("Declaration {name} has no block body")]
    MissingBody { name: String },

    #[error("Node kind {kind} cannot be rewritten by this fix")]
    UnsupportedTarget { kind: String },

    #[error("Rule {rule_id} is not fixable by this provider")]
    NotFixable { rule_id: String },

    #[error("Fix cancelled")]
    Cancelled,
}

impl ErrorCode for RewriteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Relocation { .. } => error_code::RELOCATION_FAILED,
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::REWRITE_ERROR,
        }
    }
}
