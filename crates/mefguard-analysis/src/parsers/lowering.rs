//! Lowering from a tree-sitter tree into the owned syntax tree.
//!
//! Every leaf becomes a token. Whitespace gaps and extras (comments,
//! preprocessor lines) become leading trivia of the next token, so that the
//! concatenated tokens reproduce the source exactly.

use tree_sitter::{Node, Tree, TreeCursor};

use crate::syntax::kinds;
use crate::syntax::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, Trivia, TriviaKind};

pub fn lower_tree(tree: &Tree, source: &str) -> SyntaxTree {
    let root = tree.root_node();
    let mut lowering = Lowering {
        source,
        pos: 0,
        pending: Vec::new(),
    };
    let mut cursor = tree.walk();
    let mut children = lowering.lower_children(&mut cursor);
    lowering.gap(source.len());
    children.push(SyntaxElement::Token(
        SyntaxToken::new(kinds::END_OF_FILE, "").with_leading(std::mem::take(&mut lowering.pending)),
    ));
    SyntaxTree::new(SyntaxNode::new(root.kind(), children))
}

struct Lowering<'s> {
    source: &'s str,
    pos: usize,
    pending: Vec<Trivia>,
}

impl Lowering<'_> {
    fn slice(&self, start: usize, end: usize) -> &str {
        self.source.get(start..end).unwrap_or_default()
    }

    /// Absorb uncovered text up to `until` as trivia.
    fn gap(&mut self, until: usize) {
        if until > self.pos {
            let text = self.slice(self.pos, until).to_string();
            let kind = if text.trim().is_empty() {
                TriviaKind::Whitespace
            } else {
                TriviaKind::Skipped
            };
            self.pending.push(Trivia { kind, text });
            self.pos = until;
        }
    }

    fn extra(&mut self, node: Node) {
        self.gap(node.start_byte());
        let text = self.slice(node.start_byte(), node.end_byte()).to_string();
        let trivia = if node.kind() == kinds::COMMENT {
            Trivia::comment(text)
        } else {
            Trivia::directive(text)
        };
        self.pending.push(trivia);
        self.pos = self.pos.max(node.end_byte());
    }

    fn token(&mut self, node: Node) -> SyntaxToken {
        self.gap(node.start_byte());
        let start = self.pos.max(node.start_byte());
        let end = node.end_byte().max(start);
        let text = self.slice(start, end).to_string();
        self.pos = end;
        SyntaxToken::new(node.kind(), text).with_leading(std::mem::take(&mut self.pending))
    }

    fn lower_children(&mut self, cursor: &mut TreeCursor) -> Vec<SyntaxElement> {
        let mut out = Vec::new();
        if !cursor.goto_first_child() {
            return out;
        }
        loop {
            let node = cursor.node();
            let field = cursor.field_name();
            if node.is_extra() && !node.is_error() {
                self.extra(node);
            } else if node.child_count() == 0 {
                out.push(SyntaxElement::Token(self.token(node).with_field(field)));
            } else {
                let children = self.lower_children(cursor);
                let lowered = SyntaxNode::new(node.kind(), children).with_field(field);
                out.push(SyntaxElement::from(lowered));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
        out
    }
}
