//! Attribute and interface matching.

use mefguard_core::errors::DetectionError;

use crate::declarations::{ClassDecl, MethodLike};
use crate::semantic::{InterfaceMember, InterfaceSymbol, SemanticModel};

/// Any attribute named exactly `marker`. No alias resolution and no
/// `Attribute` suffix handling: `[ImportingConstructorAttribute]` and
/// `[Composition.ImportingConstructor]` do not match.
pub fn has_injection_marker(decl: &MethodLike<'_>, marker: &str) -> bool {
    decl.attribute_names().iter().any(|name| name == marker)
}

/// Declared interfaces whose display name starts with `prefix`.
pub fn implemented_interfaces_with_prefix(
    model: &dyn SemanticModel,
    class: &ClassDecl<'_>,
    prefix: &str,
) -> Vec<InterfaceSymbol> {
    model
        .declared_interfaces(class)
        .into_iter()
        .filter(|symbol| symbol.display.starts_with(prefix))
        .collect()
}

/// True iff `method` implements at least one of `members` for `class`.
pub fn is_concrete_implementation_of<'m>(
    model: &dyn SemanticModel,
    class: &ClassDecl<'_>,
    method: &MethodLike<'_>,
    members: impl IntoIterator<Item = &'m InterfaceMember>,
) -> Result<bool, DetectionError> {
    let target = method.node().id();
    for member in members {
        if model.find_implementation_for_interface_member(class, member)? == Some(target) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// A plain named method. Constructors, explicit interface implementations,
/// accessors, operators and local functions are special kinds.
pub fn is_ordinary_method(method: &MethodLike<'_>) -> bool {
    !method.is_constructor() && method.explicit_interface().is_none()
}
