//! Interface declarations known to the syntactic model.

use rustc_hash::FxHashMap;

use crate::declarations::{compact_text, DeclarationIndex, Scope};
use crate::syntax::SyntaxTree;

/// A member as declared, before type arguments are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTemplate {
    pub name: String,
    pub parameter_types: Vec<String>,
    pub type_parameter_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    pub type_parameters: Vec<String>,
    pub members: Vec<MemberTemplate>,
}

/// A type name as written, with the scope it is resolved in.
#[derive(Debug, Clone)]
pub struct ScopedName {
    pub written: String,
    pub scope: Scope,
}

#[derive(Debug, Clone)]
pub struct ExplicitImplementation {
    pub interface: ScopedName,
    pub member: MemberTemplate,
}

/// What every part of a partial class declares, across all trees.
#[derive(Debug, Clone, Default)]
pub struct PartialClassEntry {
    pub bases: Vec<ScopedName>,
    pub explicit_implementations: Vec<ExplicitImplementation>,
}

/// Interfaces keyed by fully qualified name and arity, plus the parts of
/// partial classes keyed by fully qualified name.
#[derive(Debug, Clone, Default)]
pub struct InterfaceCatalog {
    entries: FxHashMap<(String, usize), CatalogEntry>,
    partial_classes: FxHashMap<String, PartialClassEntry>,
}

impl InterfaceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trees<'a>(trees: impl IntoIterator<Item = &'a SyntaxTree>) -> Self {
        let mut catalog = Self::new();
        for tree in trees {
            catalog.add_tree(tree);
        }
        catalog
    }

    /// Register every interface and partial class declared in `tree`. Partial
    /// declarations of the same interface contribute their members to one
    /// entry.
    pub fn add_tree(&mut self, tree: &SyntaxTree) {
        let index = DeclarationIndex::build(tree);
        for interface in &index.interfaces {
            let key = (interface.qualified_name(), interface.type_parameters.len());
            let entry = self.entries.entry(key).or_insert_with(|| CatalogEntry {
                type_parameters: interface.type_parameters.clone(),
                members: Vec::new(),
            });
            for method in interface.methods() {
                let Some(name) = method.name() else {
                    continue;
                };
                let template = MemberTemplate {
                    name: name.to_string(),
                    parameter_types: method.parameter_types(),
                    type_parameter_count: method.type_parameter_count(),
                };
                if !entry.members.contains(&template) {
                    entry.members.push(template);
                }
            }
        }

        for class in index.classes.iter().filter(|c| c.is_partial()) {
            let entry = self.partial_classes.entry(class.qualified_name()).or_default();
            for (base, scope) in class.scoped_base_types() {
                entry.bases.push(ScopedName {
                    written: compact_text(base),
                    scope: scope.clone(),
                });
            }
            for (method, scope) in class.scoped_methods() {
                let (Some(interface), Some(name)) = (method.explicit_interface_name(), method.name())
                else {
                    continue;
                };
                entry.explicit_implementations.push(ExplicitImplementation {
                    interface: ScopedName {
                        written: interface,
                        scope: scope.clone(),
                    },
                    member: MemberTemplate {
                        name: name.to_string(),
                        parameter_types: method.parameter_types(),
                        type_parameter_count: method.type_parameter_count(),
                    },
                });
            }
        }
    }

    /// Parts of the partial class `fqn` seen in any registered tree.
    pub fn partial_class(&self, fqn: &str) -> Option<&PartialClassEntry> {
        self.partial_classes.get(fqn)
    }

    pub fn get(&self, fqn: &str, arity: usize) -> Option<&CatalogEntry> {
        self.entries.get(&(fqn.to_string(), arity))
    }

    pub fn contains(&self, fqn: &str, arity: usize) -> bool {
        self.get(fqn, arity).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
