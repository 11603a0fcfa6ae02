//! LanguageParser trait.

use std::path::Path;

use mefguard_core::errors::ParseError;

use super::types::SourceUnit;

pub trait LanguageParser: Send + Sync {
    /// File extensions this parser handles, without the dot.
    fn extensions(&self) -> &[&str];

    /// Parse source code into a lossless unit. Syntax errors are tolerated
    /// and counted; only a grammar failure is an `Err`.
    fn parse(&self, source: &str, path: &Path) -> Result<SourceUnit, ParseError>;
}
