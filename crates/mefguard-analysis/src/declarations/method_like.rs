//! Common view over constructors and methods.

use std::sync::Arc;

use mefguard_core::errors::RewriteError;

use super::compact_text;
use crate::syntax::kinds::{self, field};
use crate::syntax::{SyntaxElement, SyntaxNode, SyntaxToken};

/// A method-like declaration: the unit the rules inspect and the fixer wraps.
#[derive(Debug, Clone, Copy)]
pub enum MethodLike<'a> {
    Constructor(&'a Arc<SyntaxNode>),
    Method(&'a Arc<SyntaxNode>),
}

impl<'a> MethodLike<'a> {
    pub fn from_node(node: &'a Arc<SyntaxNode>) -> Option<Self> {
        match node.kind() {
            kinds::CONSTRUCTOR_DECLARATION => Some(Self::Constructor(node)),
            kinds::METHOD_DECLARATION => Some(Self::Method(node)),
            _ => None,
        }
    }

    pub fn node(&self) -> &'a Arc<SyntaxNode> {
        match self {
            Self::Constructor(n) | Self::Method(n) => n,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, Self::Constructor(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Constructor(_) => "constructor",
            Self::Method(_) => "method",
        }
    }

    /// Child index and token of the declared name.
    pub fn name_token(&self) -> Option<(usize, &'a SyntaxToken)> {
        let children = self.node().children();
        if let Some(found) = children.iter().enumerate().find_map(|(i, c)| {
            c.as_token()
                .filter(|t| t.field == Some(field::NAME))
                .map(|t| (i, t))
        }) {
            return Some(found);
        }
        // Fall back to the identifier just before the parameter list.
        let params = children
            .iter()
            .position(|c| c.kind() == kinds::PARAMETER_LIST)?;
        children[..params]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, c)| c.as_token().filter(|t| t.kind == kinds::IDENTIFIER).map(|t| (i, t)))
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name_token().map(|(_, t)| t.text.as_str())
    }

    pub fn parameter_list(&self) -> Option<&'a Arc<SyntaxNode>> {
        let node = self.node();
        node.child_node_by_field(field::PARAMETERS)
            .filter(|n| n.kind() == kinds::PARAMETER_LIST)
            .or_else(|| node.first_child_of_kind(kinds::PARAMETER_LIST))
    }

    pub fn parameters(&self) -> Vec<&'a Arc<SyntaxNode>> {
        self.parameter_list()
            .map(|list| {
                list.child_nodes()
                    .filter(|n| n.kind() == kinds::PARAMETER)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn attribute_lists(&self) -> Vec<&'a Arc<SyntaxNode>> {
        self.node()
            .child_nodes()
            .filter(|n| n.kind() == kinds::ATTRIBUTE_LIST)
            .collect()
    }

    /// Attribute names exactly as written, e.g. `ImportingConstructor` or
    /// `Composition.ImportingConstructor`.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attribute_lists()
            .into_iter()
            .flat_map(|list| list.child_nodes().filter(|n| n.kind() == kinds::ATTRIBUTE))
            .filter_map(|attr| {
                attr.child_by_field(field::NAME)
                    .or_else(|| attr.children().first())
                    .map(compact_text)
            })
            .collect()
    }

    /// The block body. `None` for expression-bodied, abstract and extern
    /// declarations.
    pub fn body(&self) -> Option<&'a Arc<SyntaxNode>> {
        self.node().first_child_of_kind(kinds::BLOCK)
    }

    /// Statements of the block body, braces excluded.
    pub fn statements(&self) -> Option<Vec<&'a SyntaxElement>> {
        self.body().map(|block| {
            block
                .children()
                .iter()
                .filter(|c| !matches!(c.kind(), "{" | "}"))
                .collect()
        })
    }

    pub fn modifiers(&self) -> Vec<String> {
        self.node()
            .children()
            .iter()
            .filter(|c| c.kind() == kinds::MODIFIER)
            .map(compact_text)
            .collect()
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers().iter().any(|m| m == modifier)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier("static")
    }

    pub fn explicit_interface(&self) -> Option<&'a Arc<SyntaxNode>> {
        self.node()
            .first_child_of_kind(kinds::EXPLICIT_INTERFACE_SPECIFIER)
    }

    /// Interface named by the explicit specifier, without the trailing dot.
    pub fn explicit_interface_name(&self) -> Option<String> {
        let specifier = self.explicit_interface()?;
        let written = compact_text(&SyntaxElement::Node(Arc::clone(specifier)));
        Some(written.trim_end_matches('.').to_string())
    }

    pub fn type_parameter_count(&self) -> usize {
        self.node()
            .first_child_of_kind(kinds::TYPE_PARAMETER_LIST)
            .map(|list| {
                list.children()
                    .iter()
                    .filter(|c| c.kind() == kinds::TYPE_PARAMETER)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Per-parameter text minus attributes, name and default value, with all
    /// whitespace removed. `ref int`, `List<string>`, `T[]`.
    pub fn parameter_types(&self) -> Vec<String> {
        self.parameters()
            .into_iter()
            .map(|p| parameter_type_text(p))
            .collect()
    }
}

fn parameter_type_text(parameter: &SyntaxNode) -> String {
    let mut out = String::new();
    for child in parameter.children() {
        if child.kind() == kinds::EQUALS_VALUE_CLAUSE || child.kind() == "=" {
            break;
        }
        if child.kind() == kinds::ATTRIBUTE_LIST || child.field() == Some(field::NAME) {
            continue;
        }
        out.push_str(&compact_text(child));
    }
    out
}

/// `decl` with its block body swapped for `body`.
pub fn with_body(decl: &SyntaxNode, body: SyntaxNode) -> Result<SyntaxNode, RewriteError> {
    let mut children = decl.children().to_vec();
    let slot = children
        .iter()
        .position(|c| c.kind() == kinds::BLOCK)
        .ok_or_else(|| RewriteError::MissingBody {
            name: declaration_label(decl),
        })?;
    let field = children[slot].field();
    children[slot] = SyntaxElement::from(body.with_field(field));
    Ok(decl.with_children(children))
}

pub fn with_parameter_list(
    decl: &SyntaxNode,
    list: &Arc<SyntaxNode>,
) -> Result<SyntaxNode, RewriteError> {
    let mut children = decl.children().to_vec();
    let slot = children
        .iter()
        .position(|c| c.kind() == kinds::PARAMETER_LIST)
        .ok_or_else(|| RewriteError::UnsupportedTarget {
            kind: decl.kind().to_string(),
        })?;
    children[slot] = SyntaxElement::Node(Arc::new(list.with_field(children[slot].field())));
    Ok(decl.with_children(children))
}

/// Replaces every attribute list of `decl` with `lists`, placed first.
pub fn with_attribute_lists(decl: &SyntaxNode, lists: &[Arc<SyntaxNode>]) -> SyntaxNode {
    let mut children: Vec<SyntaxElement> = lists.iter().cloned().map(SyntaxElement::Node).collect();
    children.extend(
        decl.children()
            .iter()
            .filter(|c| c.kind() != kinds::ATTRIBUTE_LIST)
            .cloned(),
    );
    decl.with_children(children)
}

/// Name used in logs and errors.
pub fn declaration_label(decl: &SyntaxNode) -> String {
    decl.children()
        .iter()
        .find_map(|c| c.as_token().filter(|t| t.field == Some(field::NAME)))
        .map(|t| t.text.clone())
        .unwrap_or_else(|| decl.kind().to_string())
}
