//! Semantic model built from syntax alone.
//!
//! Base-list entries are resolved against an [`InterfaceCatalog`] using the
//! class's alias usings, the name as written, its enclosing namespaces
//! (innermost first) and finally its using directives. Implementations are
//! matched by name, type-parameter count and parameter signature.

use std::sync::Arc;

use mefguard_core::errors::DetectionError;
use regex::Regex;

use super::catalog::{CatalogEntry, InterfaceCatalog, PartialClassEntry};
use super::{InterfaceMember, InterfaceSymbol, SemanticModel};
use crate::declarations::{compact_text, ClassDecl, MethodLike, Scope};
use crate::syntax::NodeId;

pub struct SyntacticModel {
    catalog: Arc<InterfaceCatalog>,
}

impl SyntacticModel {
    pub fn new(catalog: Arc<InterfaceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &InterfaceCatalog {
        &self.catalog
    }

    /// Resolve a type reference as written in `scope` to a catalog entry.
    fn resolve(&self, written: &str, scope: &Scope) -> Option<Resolved<'_>> {
        let (name, args) = split_type_arguments(written);
        let name = name.strip_prefix("global::").unwrap_or(name);
        let arity = args.len();
        let candidates = candidate_names(name, scope);
        let (fqn, entry) = candidates
            .into_iter()
            .find_map(|c| self.catalog.get(&c, arity).map(|e| (c, e)))?;
        let display = if args.is_empty() {
            fqn.clone()
        } else {
            format!("{}<{}>", fqn, args.join(", "))
        };
        Some(Resolved {
            fqn,
            display,
            args,
            entry,
        })
    }
}

struct Resolved<'c> {
    fqn: String,
    display: String,
    args: Vec<String>,
    entry: &'c CatalogEntry,
}

impl Resolved<'_> {
    fn symbol(self) -> InterfaceSymbol {
        let substitutions = type_substitutions(&self.entry.type_parameters, &self.args);
        let members = self
            .entry
            .members
            .iter()
            .map(|m| InterfaceMember {
                interface: self.display.clone(),
                name: m.name.clone(),
                parameter_types: m
                    .parameter_types
                    .iter()
                    .map(|p| substitute(p, &substitutions))
                    .collect(),
                type_parameter_count: m.type_parameter_count,
            })
            .collect();
        InterfaceSymbol {
            fqn: self.fqn,
            display: self.display,
            members,
        }
    }
}

impl SemanticModel for SyntacticModel {
    fn declared_interfaces(&self, class: &ClassDecl<'_>) -> Vec<InterfaceSymbol> {
        let mut written: Vec<(String, &Scope)> = class
            .scoped_base_types()
            .into_iter()
            .map(|(base, scope)| (compact_text(base), scope))
            .collect();
        if let Some(entry) = self.partial_entry(class) {
            written.extend(entry.bases.iter().map(|b| (b.written.clone(), &b.scope)));
        }

        let mut symbols: Vec<InterfaceSymbol> = Vec::new();
        for (name, scope) in written {
            let Some(resolved) = self.resolve(&name, scope) else {
                tracing::trace!(
                    class = %class.qualified_name(),
                    base = %name,
                    "base type is not a known interface"
                );
                continue;
            };
            if !symbols.iter().any(|s| s.display == resolved.display) {
                symbols.push(resolved.symbol());
            }
        }
        symbols
    }

    fn find_implementation_for_interface_member(
        &self,
        class: &ClassDecl<'_>,
        member: &InterfaceMember,
    ) -> Result<Option<NodeId>, DetectionError> {
        let methods = class.scoped_methods();
        let signature_matches = |m: &MethodLike<'_>| {
            m.name() == Some(member.name.as_str())
                && m.type_parameter_count() == member.type_parameter_count
                && m.parameter_types() == member.parameter_types
        };
        let names_interface = |written: &str, scope: &Scope| {
            self.resolve(written, scope)
                .is_some_and(|r| r.display == member.interface)
        };

        // An explicit implementation takes precedence over a public method.
        for (method, scope) in &methods {
            let Some(written) = method.explicit_interface_name() else {
                continue;
            };
            if names_interface(&written, scope) && signature_matches(method) {
                return Ok(Some(method.node().id()));
            }
        }
        // Explicitly implemented by a part in another unit.
        if let Some(entry) = self.partial_entry(class) {
            let elsewhere = entry.explicit_implementations.iter().any(|e| {
                e.member.name == member.name
                    && e.member.type_parameter_count == member.type_parameter_count
                    && e.member.parameter_types == member.parameter_types
                    && names_interface(&e.interface.written, &e.interface.scope)
            });
            if elsewhere {
                return Ok(None);
            }
        }

        Ok(methods
            .iter()
            .map(|(m, _)| m)
            .filter(|m| m.explicit_interface().is_none())
            .filter(|m| m.has_modifier("public") && !m.is_static())
            .find(|m| signature_matches(m))
            .map(|m| m.node().id()))
    }
}

impl SyntacticModel {
    fn partial_entry(&self, class: &ClassDecl<'_>) -> Option<&PartialClassEntry> {
        if !class.is_partial() {
            return None;
        }
        self.catalog.partial_class(&class.qualified_name())
    }
}

/// `Ns.IFoo<int, List<string>>` into (`Ns.IFoo`, [`int`, `List<string>`]).
pub fn split_type_arguments(written: &str) -> (&str, Vec<String>) {
    let Some(open) = written.find('<') else {
        return (written, Vec::new());
    };
    let inner = written[open + 1..].strip_suffix('>').unwrap_or(&written[open + 1..]);
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '<' | '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            '>' | ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => args.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    args.push(current);
    (&written[..open], args)
}

/// Fully qualified candidates for `name`, in lookup order.
fn candidate_names(name: &str, scope: &Scope) -> Vec<String> {
    let mut candidates = Vec::new();
    let (head, rest) = match name.split_once('.') {
        Some((h, r)) => (h, Some(r)),
        None => (name, None),
    };

    for using in &scope.usings {
        if using.alias.as_deref() == Some(head) {
            candidates.push(match rest {
                Some(r) => format!("{}.{}", using.name, r),
                None => using.name.clone(),
            });
        }
    }

    candidates.push(name.to_string());

    let mut types = scope.containing_types.clone();
    while !types.is_empty() {
        let nested = Scope {
            containing_types: types.clone(),
            ..scope.clone()
        };
        candidates.push(nested.qualify(name));
        types.pop();
    }

    for namespace in scope.namespace_chain() {
        if !namespace.is_empty() {
            candidates.push(format!("{namespace}.{name}"));
        }
    }

    for using in &scope.usings {
        if using.alias.is_none() && !using.is_static {
            candidates.push(format!("{}.{}", using.name, name));
        }
    }

    candidates.dedup();
    candidates
}

fn type_substitutions(parameters: &[String], args: &[String]) -> Vec<(Regex, String)> {
    parameters
        .iter()
        .zip(args)
        .filter_map(|(param, arg)| {
            Regex::new(&format!(r"\b{}\b", regex::escape(param)))
                .ok()
                .map(|re| (re, arg.clone()))
        })
        .collect()
}

fn substitute(text: &str, substitutions: &[(Regex, String)]) -> String {
    if substitutions.is_empty() {
        return text.to_string();
    }
    // Placeholders first so that `T -> U, U -> int` does not chain.
    let mut out = text.to_string();
    for (i, (re, _)) in substitutions.iter().enumerate() {
        out = re.replace_all(&out, format!("\u{0}{i}\u{0}").as_str()).into_owned();
    }
    for (i, (_, arg)) in substitutions.iter().enumerate() {
        out = out.replace(&format!("\u{0}{i}\u{0}"), arg);
    }
    out
}
