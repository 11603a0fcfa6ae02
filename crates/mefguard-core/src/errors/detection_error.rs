//! Detection errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while deciding whether a single declaration needs protection.
///
/// The rule engine collects these per declaration; one failure never hides
/// diagnostics for the other declarations of the unit.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Cannot resolve interface {interface} for class {class}: {message}")]
    UnresolvedInterface {
        class: String,
        interface: String,
        message: String,
    },

    #[error("Semantic model failed for {declaration}: {message}")]
    SemanticModel { declaration: String, message: String },

    #[error("Declaration {declaration} has no span in tree")]
    MissingSpan { declaration: String },
}

impl ErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTION_ERROR
    }
}
