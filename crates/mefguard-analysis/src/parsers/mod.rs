//! Tree-sitter front end: parses C# and lowers it into the owned syntax tree.

pub mod csharp;
pub mod error_tolerant;
pub mod lowering;
pub mod traits;
pub mod types;

pub use csharp::CSharpParser;
pub use traits::LanguageParser;
pub use types::SourceUnit;
