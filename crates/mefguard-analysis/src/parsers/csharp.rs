//! C# parser.

use std::cell::RefCell;
use std::path::Path;
use std::time::Instant;

use mefguard_core::errors::ParseError;
use tree_sitter::Parser;

use super::error_tolerant::count_errors;
use super::lowering::lower_tree;
use super::traits::LanguageParser;
use super::types::SourceUnit;

thread_local! {
    static PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

pub struct CSharpParser;

impl Default for CSharpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CSharpParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for CSharpParser {
    fn extensions(&self) -> &[&str] {
        &["cs"]
    }

    fn parse(&self, source: &str, path: &Path) -> Result<SourceUnit, ParseError> {
        let start = Instant::now();
        let ts_tree = PARSER.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                let mut parser = Parser::new();
                parser
                    .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
                    .map_err(|e| ParseError::GrammarNotFound {
                        language: format!("csharp ({e})"),
                    })?;
                *slot = Some(parser);
            }
            let parser = slot.as_mut().ok_or_else(|| ParseError::GrammarNotFound {
                language: "csharp".to_string(),
            })?;
            parser
                .parse(source, None)
                .ok_or_else(|| ParseError::TreeSitterError {
                    path: path.to_path_buf(),
                    message: "parser returned no tree".to_string(),
                })
        })?;

        let (error_count, error_ranges) = count_errors(ts_tree.root_node());
        if error_count > 0 {
            tracing::warn!(
                file = %path.display(),
                errors = error_count,
                "syntax errors in source, analysing partial tree"
            );
        }
        let tree = lower_tree(&ts_tree, source);

        Ok(SourceUnit {
            path: path.to_path_buf(),
            tree,
            error_count,
            error_ranges,
            parse_time_us: start.elapsed().as_micros() as u64,
        })
    }
}
