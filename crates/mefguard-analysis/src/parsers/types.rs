//! Parse output.

use std::path::PathBuf;

use crate::syntax::{SyntaxTree, TextRange};

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub tree: SyntaxTree,
    pub error_count: u32,
    pub error_ranges: Vec<TextRange>,
    pub parse_time_us: u64,
}

impl SourceUnit {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Display form of the path used in diagnostics.
    pub fn file_name(&self) -> String {
        self.path.display().to_string()
    }

    /// Same unit over an edited tree.
    pub fn with_tree(&self, tree: SyntaxTree) -> Self {
        Self {
            tree,
            ..self.clone()
        }
    }
}
