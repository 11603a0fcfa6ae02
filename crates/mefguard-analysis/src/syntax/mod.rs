//! Owned lossless syntax tree.

pub mod kinds;
pub mod node;
pub mod text;
pub mod tree;

pub use node::{NodeId, SyntaxElement, SyntaxNode, SyntaxToken, TrackingMarker, Trivia, TriviaKind};
pub use text::{LineIndex, TextRange};
pub use tree::{NodeSpan, SpanIndex, SyntaxTree, TokenAt};
