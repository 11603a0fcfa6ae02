//! Declaration views over the syntax tree: method-like declarations,
//! classes, interfaces and using directives, plus a per-unit index.

pub mod class_decl;
pub mod index;
pub mod method_like;
pub mod using;

pub use class_decl::{ClassDecl, ClassPart, InterfaceDecl, Scope};
pub use index::DeclarationIndex;
pub use method_like::MethodLike;
pub use using::UsingDirective;

use crate::syntax::SyntaxElement;

/// Token texts concatenated without trivia: `System . IO` reads `System.IO`.
pub fn compact_text(element: &SyntaxElement) -> String {
    match element {
        SyntaxElement::Token(t) => t.text.clone(),
        SyntaxElement::Node(n) => n.tokens().into_iter().map(|t| t.text.as_str()).collect(),
    }
}
