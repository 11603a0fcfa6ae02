//! Type declarations with their name-resolution scope.

use std::sync::Arc;

use super::{compact_text, MethodLike, UsingDirective};
use crate::syntax::kinds::{self, field};
use crate::syntax::{SyntaxElement, SyntaxNode};

/// Names visible at a declaration: its namespace, the types enclosing it, and
/// the using directives of every enclosing container.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Dotted namespace, empty for the global namespace.
    pub namespace: String,
    pub containing_types: Vec<String>,
    pub usings: Vec<UsingDirective>,
}

impl Scope {
    pub fn enter_namespace(&self, name: &str) -> Self {
        let namespace = if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.namespace, name)
        };
        Self {
            namespace,
            ..self.clone()
        }
    }

    pub fn enter_type(&self, name: &str) -> Self {
        let mut scope = self.clone();
        scope.containing_types.push(name.to_string());
        scope
    }

    /// Fully qualified name of a type declared in this scope.
    pub fn qualify(&self, name: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.namespace.is_empty() {
            parts.push(&self.namespace);
        }
        parts.extend(self.containing_types.iter().map(String::as_str));
        parts.push(name);
        parts.join(".")
    }

    /// Enclosing namespaces, innermost first, ending with the global one.
    pub fn namespace_chain(&self) -> Vec<String> {
        let mut chain = Vec::new();
        let parts: Vec<&str> = self
            .namespace
            .split('.')
            .filter(|p| !p.is_empty())
            .collect();
        for len in (1..=parts.len()).rev() {
            chain.push(parts[..len].join("."));
        }
        chain.push(String::new());
        chain
    }
}

fn declared_name(node: &SyntaxNode) -> String {
    node.child_by_field(field::NAME)
        .or_else(|| {
            node.children()
                .iter()
                .find(|c| c.kind() == kinds::IDENTIFIER)
        })
        .map(compact_text)
        .unwrap_or_default()
}

fn type_parameters(node: &SyntaxNode) -> Vec<String> {
    node.first_child_of_kind(kinds::TYPE_PARAMETER_LIST)
        .map(|list| {
            list.children()
                .iter()
                .filter(|c| c.kind() == kinds::TYPE_PARAMETER)
                .map(|c| {
                    // `in T` / `out T`: the name is the last token.
                    c.as_node()
                        .and_then(|n| n.tokens().last().map(|t| t.text.clone()))
                        .unwrap_or_else(|| compact_text(c))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn member_list(node: &SyntaxNode) -> Option<&Arc<SyntaxNode>> {
    node.child_node_by_field(field::BODY)
        .filter(|n| n.kind() == kinds::DECLARATION_LIST)
        .or_else(|| node.first_child_of_kind(kinds::DECLARATION_LIST))
}

fn direct_methods(node: &SyntaxNode) -> Vec<MethodLike<'_>> {
    member_list(node)
        .map(|list| {
            list.child_nodes()
                .filter(|n| n.kind() == kinds::METHOD_DECLARATION)
                .filter_map(MethodLike::from_node)
                .collect()
        })
        .unwrap_or_default()
}

/// Another declaration of the same partial class, with its own scope.
#[derive(Debug, Clone)]
pub struct ClassPart<'a> {
    pub node: &'a Arc<SyntaxNode>,
    pub scope: Scope,
}

/// A `class` declaration. For a partial class this is the first part in the
/// unit; the later parts are in `other_parts`.
#[derive(Debug, Clone)]
pub struct ClassDecl<'a> {
    pub node: &'a Arc<SyntaxNode>,
    pub name: String,
    pub scope: Scope,
    pub other_parts: Vec<ClassPart<'a>>,
}

impl<'a> ClassDecl<'a> {
    pub fn new(node: &'a Arc<SyntaxNode>, scope: Scope) -> Self {
        Self {
            name: declared_name(node),
            node,
            scope,
            other_parts: Vec::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        self.scope.qualify(&self.name)
    }

    pub fn is_partial(&self) -> bool {
        is_partial_node(self.node)
    }

    /// Every part in document order, each with the scope it is declared in.
    pub fn parts(&self) -> Vec<(&'a Arc<SyntaxNode>, &Scope)> {
        std::iter::once((self.node, &self.scope))
            .chain(self.other_parts.iter().map(|p| (p.node, &p.scope)))
            .collect()
    }

    /// Base-list entries as written, across all parts.
    pub fn base_types(&self) -> Vec<&'a SyntaxElement> {
        self.scoped_base_types().into_iter().map(|(b, _)| b).collect()
    }

    /// Base-list entries with the scope of the part that lists them.
    pub fn scoped_base_types(&self) -> Vec<(&'a SyntaxElement, &Scope)> {
        self.parts()
            .into_iter()
            .flat_map(|(node, scope)| base_list(node).into_iter().map(move |b| (b, scope)))
            .collect()
    }

    /// Method declarations directly in the class body, across all parts.
    pub fn methods(&self) -> Vec<MethodLike<'a>> {
        self.scoped_methods().into_iter().map(|(m, _)| m).collect()
    }

    pub fn scoped_methods(&self) -> Vec<(MethodLike<'a>, &Scope)> {
        self.parts()
            .into_iter()
            .flat_map(|(node, scope)| direct_methods(node).into_iter().map(move |m| (m, scope)))
            .collect()
    }
}

pub fn is_partial_node(node: &SyntaxNode) -> bool {
    node.children()
        .iter()
        .filter(|c| c.kind() == kinds::MODIFIER)
        .any(|c| compact_text(c) == "partial")
}

fn base_list(node: &SyntaxNode) -> Vec<&SyntaxElement> {
    node.first_child_of_kind(kinds::BASE_LIST)
        .map(|list| {
            list.children()
                .iter()
                .filter(|c| !matches!(c.kind(), ":" | ","))
                .collect()
        })
        .unwrap_or_default()
}

/// An `interface` declaration.
#[derive(Debug, Clone)]
pub struct InterfaceDecl<'a> {
    pub node: &'a Arc<SyntaxNode>,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub scope: Scope,
}

impl<'a> InterfaceDecl<'a> {
    pub fn new(node: &'a Arc<SyntaxNode>, scope: Scope) -> Self {
        Self {
            name: declared_name(node),
            type_parameters: type_parameters(node),
            node,
            scope,
        }
    }

    pub fn qualified_name(&self) -> String {
        self.scope.qualify(&self.name)
    }

    pub fn methods(&self) -> Vec<MethodLike<'a>> {
        direct_methods(self.node)
    }
}
