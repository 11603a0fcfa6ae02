//! Per-unit declaration index.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{compact_text, ClassDecl, ClassPart, InterfaceDecl, MethodLike, Scope, UsingDirective};
use crate::syntax::kinds::{self, field};
use crate::syntax::{SyntaxNode, SyntaxTree};

/// Declarations of one source unit, in document order.
#[derive(Debug, Default)]
pub struct DeclarationIndex<'a> {
    pub constructors: Vec<MethodLike<'a>>,
    pub classes: Vec<ClassDecl<'a>>,
    pub interfaces: Vec<InterfaceDecl<'a>>,
    /// Using directives directly under the compilation unit.
    pub top_level_usings: Vec<UsingDirective>,
}

impl<'a> DeclarationIndex<'a> {
    pub fn build(tree: &'a SyntaxTree) -> Self {
        let mut index = Self::default();
        let root = tree.root();
        index.top_level_usings = usings_of(root);
        index.walk_container(root, &Scope::default());
        index.merge_partial_classes();
        index
    }

    /// Fold later parts of a partial class into its first part.
    fn merge_partial_classes(&mut self) {
        let mut first_part: FxHashMap<String, usize> = FxHashMap::default();
        let mut merged: Vec<ClassDecl<'a>> = Vec::with_capacity(self.classes.len());
        for class in std::mem::take(&mut self.classes) {
            if !class.is_partial() {
                merged.push(class);
                continue;
            }
            match first_part.get(&class.qualified_name()) {
                Some(&i) => merged[i].other_parts.push(ClassPart {
                    node: class.node,
                    scope: class.scope,
                }),
                None => {
                    first_part.insert(class.qualified_name(), merged.len());
                    merged.push(class);
                }
            }
        }
        self.classes = merged;
    }

    /// Walk a compilation unit, namespace body or type body.
    fn walk_container(&mut self, container: &'a SyntaxNode, inherited: &Scope) {
        let mut scope = inherited.clone();
        scope.usings.extend(usings_of(container));

        for child in container.child_nodes() {
            match child.kind() {
                kinds::FILE_SCOPED_NAMESPACE_DECLARATION => {
                    // Applies to its own members and to every later sibling.
                    scope = scope.enter_namespace(&namespace_name(child));
                    self.walk_container(child, &scope);
                    scope.usings.extend(usings_of(child));
                }
                _ => self.walk_node(child, &scope),
            }
        }
    }

    fn walk_node(&mut self, node: &'a Arc<SyntaxNode>, scope: &Scope) {
        match node.kind() {
            kinds::NAMESPACE_DECLARATION => {
                let inner = scope.enter_namespace(&namespace_name(node));
                if let Some(body) = node
                    .child_node_by_field(field::BODY)
                    .or_else(|| node.first_child_of_kind(kinds::DECLARATION_LIST))
                {
                    self.walk_container(body, &inner);
                }
            }
            kinds::CLASS_DECLARATION => {
                let class = ClassDecl::new(node, scope.clone());
                let inner = scope.enter_type(&class.name);
                self.classes.push(class);
                self.walk_children(node, &inner);
            }
            kinds::INTERFACE_DECLARATION => {
                let interface = InterfaceDecl::new(node, scope.clone());
                let inner = scope.enter_type(&interface.name);
                self.interfaces.push(interface);
                self.walk_children(node, &inner);
            }
            kinds::CONSTRUCTOR_DECLARATION => {
                if let Some(ctor) = MethodLike::from_node(node) {
                    self.constructors.push(ctor);
                }
            }
            kinds::METHOD_DECLARATION | kinds::BLOCK | kinds::ARROW_EXPRESSION_CLAUSE => {}
            kind if kind.ends_with("_declaration") && kind != kinds::DECLARATION_LIST => {
                // struct, record, enum: nested types resolve through them.
                let name = node
                    .child_by_field(field::NAME)
                    .map(compact_text)
                    .unwrap_or_default();
                let inner = scope.enter_type(&name);
                self.walk_children(node, &inner);
            }
            _ => self.walk_children(node, scope),
        }
    }

    fn walk_children(&mut self, node: &'a SyntaxNode, scope: &Scope) {
        for child in node.child_nodes() {
            self.walk_node(child, scope);
        }
    }
}

fn usings_of(container: &SyntaxNode) -> Vec<UsingDirective> {
    container
        .child_nodes()
        .filter(|n| n.kind() == kinds::USING_DIRECTIVE)
        .filter_map(|n| UsingDirective::from_node(n))
        .collect()
}

fn namespace_name(node: &SyntaxNode) -> String {
    node.child_by_field(field::NAME)
        .or_else(|| {
            node.children().iter().find(|c| {
                matches!(c.kind(), kinds::IDENTIFIER | kinds::QUALIFIED_NAME)
            })
        })
        .map(compact_text)
        .unwrap_or_default()
}
