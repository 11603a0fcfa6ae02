//! A complete source unit and copy-on-write edits over it.

use std::sync::Arc;

use mefguard_core::errors::RewriteError;
use rustc_hash::FxHashMap;

use super::node::{NodeId, SyntaxElement, SyntaxNode, SyntaxToken, TrackingMarker};
use super::text::TextRange;

/// Where a node sits in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpan {
    /// Including the leading trivia of the first token.
    pub full: TextRange,
    /// Starting at the first token's text.
    pub trimmed: TextRange,
}

pub type SpanIndex = FxHashMap<NodeId, NodeSpan>;

/// A token located by offset, with its ancestors from the root down.
#[derive(Debug)]
pub struct TokenAt<'a> {
    pub token: &'a SyntaxToken,
    pub range: TextRange,
    pub ancestors: Vec<&'a Arc<SyntaxNode>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: Arc<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn from_root(root: Arc<SyntaxNode>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Arc<SyntaxNode> {
        &self.root
    }

    /// Reproduces the source byte-for-byte.
    pub fn text(&self) -> String {
        self.root.full_text()
    }

    /// Root first, then every node preorder.
    pub fn nodes(&self) -> Vec<&Arc<SyntaxNode>> {
        let mut out = vec![&self.root];
        out.extend(self.root.descendant_nodes());
        out
    }

    pub fn find_node(&self, id: NodeId) -> Option<&Arc<SyntaxNode>> {
        self.nodes().into_iter().find(|n| n.id() == id)
    }

    pub fn find_by_marker(&self, marker: TrackingMarker) -> Vec<&Arc<SyntaxNode>> {
        self.nodes()
            .into_iter()
            .filter(|n| n.has_marker(marker))
            .collect()
    }

    /// New tree with node `id` swapped for `replacement`. The replacement
    /// takes over the old node's field; every ancestor is rebuilt.
    pub fn replace_node(
        &self,
        id: NodeId,
        replacement: SyntaxNode,
    ) -> Result<SyntaxTree, RewriteError> {
        if self.root.id() == id {
            return Ok(Self::new(replacement.with_field(self.root.field())));
        }
        replace_in(&self.root, id, &replacement)
            .map(Self::from_root)
            .ok_or(RewriteError::NodeNotFound { id: id.raw() })
    }

    pub fn span_index(&self) -> SpanIndex {
        let mut index = SpanIndex::default();
        index_spans(&self.root, 0, &mut index);
        index
    }

    /// The token whose text covers `offset`, or the first token starting at
    /// or after it.
    pub fn token_at_offset(&self, offset: usize) -> Option<TokenAt<'_>> {
        let mut pos = 0;
        let mut ancestors = vec![&self.root];
        find_token(&self.root, offset, &mut pos, &mut ancestors)
    }
}

fn replace_in(
    node: &Arc<SyntaxNode>,
    id: NodeId,
    replacement: &SyntaxNode,
) -> Option<Arc<SyntaxNode>> {
    for (i, child) in node.children().iter().enumerate() {
        let SyntaxElement::Node(child_node) = child else {
            continue;
        };
        let new_child = if child_node.id() == id {
            Arc::new(replacement.with_field(child_node.field()))
        } else {
            match replace_in(child_node, id, replacement) {
                Some(n) => n,
                None => continue,
            }
        };
        let mut children = node.children().to_vec();
        children[i] = SyntaxElement::Node(new_child);
        return Some(Arc::new(node.with_children(children)));
    }
    None
}

fn index_spans(node: &SyntaxNode, start: usize, index: &mut SpanIndex) -> usize {
    let mut pos = start;
    for child in node.children() {
        pos = match child {
            SyntaxElement::Node(n) => index_spans(n, pos, index),
            SyntaxElement::Token(t) => pos + t.full_len(),
        };
    }
    let trimmed_start = (start + node.leading_len()).min(pos);
    index.insert(
        node.id(),
        NodeSpan {
            full: TextRange::new(start, pos),
            trimmed: TextRange::new(trimmed_start, pos),
        },
    );
    pos
}

fn find_token<'a>(
    node: &'a SyntaxNode,
    offset: usize,
    pos: &mut usize,
    ancestors: &mut Vec<&'a Arc<SyntaxNode>>,
) -> Option<TokenAt<'a>> {
    for child in node.children() {
        match child {
            SyntaxElement::Token(t) => {
                let start = *pos + t.leading_len();
                let end = start + t.text.len();
                *pos = end;
                if offset < end || (offset == start && t.text.is_empty()) {
                    return Some(TokenAt {
                        token: t,
                        range: TextRange::new(start, end),
                        ancestors: ancestors.clone(),
                    });
                }
            }
            SyntaxElement::Node(n) => {
                let full_end = *pos + n.full_len();
                if offset >= full_end {
                    *pos = full_end;
                    continue;
                }
                ancestors.push(n);
                if let Some(found) = find_token(n, offset, pos, ancestors) {
                    return Some(found);
                }
                ancestors.pop();
            }
        }
    }
    None
}
