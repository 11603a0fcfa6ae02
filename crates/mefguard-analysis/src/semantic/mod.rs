//! Semantic capability consumed by the callback rule.
//!
//! The rule engine only asks two questions: which interfaces a class lists,
//! and which method implements a given interface member. Any front end that
//! can answer them plugs in through [`SemanticModel`].

pub mod catalog;
pub mod syntactic;

pub use catalog::{
    ExplicitImplementation, InterfaceCatalog, MemberTemplate, PartialClassEntry, ScopedName,
};
pub use syntactic::SyntacticModel;

use mefguard_core::errors::DetectionError;
use serde::Serialize;

use crate::declarations::ClassDecl;
use crate::syntax::NodeId;

/// An interface as listed by a class, with type arguments applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceSymbol {
    /// Fully qualified name without type arguments.
    pub fqn: String,
    /// Fully qualified name with type arguments, e.g. `Ns.IFoo<int>`.
    pub display: String,
    pub members: Vec<InterfaceMember>,
}

/// A method declared directly on an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceMember {
    /// Display name of the declaring interface.
    pub interface: String,
    pub name: String,
    /// Parameter types after type-argument substitution, whitespace removed.
    pub parameter_types: Vec<String>,
    pub type_parameter_count: usize,
}

pub trait SemanticModel: Send + Sync {
    /// Interfaces listed directly in the class's base list.
    fn declared_interfaces(&self, class: &ClassDecl<'_>) -> Vec<InterfaceSymbol>;

    /// The method of `class` that implements `member`, if any.
    fn find_implementation_for_interface_member(
        &self,
        class: &ClassDecl<'_>,
        member: &InterfaceMember,
    ) -> Result<Option<NodeId>, DetectionError>;
}
