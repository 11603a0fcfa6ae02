//! Using directives.

use crate::syntax::{NodeId, SyntaxNode};

use super::compact_text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingDirective {
    pub node_id: NodeId,
    /// Target namespace or type, whitespace removed.
    pub name: String,
    /// `X` in `using X = Some.Namespace;`.
    pub alias: Option<String>,
    pub is_static: bool,
    pub is_global: bool,
}

impl UsingDirective {
    pub fn from_node(node: &SyntaxNode) -> Option<Self> {
        let children = node.children();
        let end = children
            .iter()
            .rposition(|c| c.kind() == ";")
            .unwrap_or(children.len());
        let body = children.get(..end)?;

        let is_keyword = |kind: &str| matches!(kind, "using" | "global" | "static" | "unsafe");
        let equals = body.iter().position(|c| c.kind() == "=");
        let (alias, target) = match equals {
            Some(eq) => {
                let alias = body[..eq]
                    .iter()
                    .rev()
                    .find(|c| !is_keyword(c.kind()))
                    .map(compact_text);
                let target: String = body[eq + 1..].iter().map(compact_text).collect();
                (alias, target)
            }
            None => {
                let target: String = body
                    .iter()
                    .skip_while(|c| is_keyword(c.kind()))
                    .map(compact_text)
                    .collect();
                (None, target)
            }
        };
        if target.is_empty() {
            return None;
        }
        Some(Self {
            node_id: node.id(),
            name: target,
            alias,
            is_static: body.iter().any(|c| c.kind() == "static"),
            is_global: body.iter().any(|c| c.kind() == "global"),
        })
    }
}
