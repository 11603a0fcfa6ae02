//! Structural identity of a declaration: name, parameter list text and the
//! absence of `static`.

use std::sync::Arc;

use crate::declarations::MethodLike;
use crate::syntax::{SyntaxNode, SyntaxTree};

/// Parameter lists are equal when every parameter's text matches pairwise
/// once all whitespace is removed.
pub fn is_param_list_equal(a: &MethodLike<'_>, b: &MethodLike<'_>) -> bool {
    let (pa, pb) = (a.parameters(), b.parameters());
    pa.len() == pb.len()
        && pa
            .iter()
            .zip(&pb)
            .all(|(x, y)| strip_whitespace(&x.text()) == strip_whitespace(&y.text()))
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Every non-static declaration of the same kind as `original` with the
/// same name and parameter list.
pub fn find_specific_declaration<'t>(
    tree: &'t SyntaxTree,
    original: &MethodLike<'_>,
) -> Vec<&'t Arc<SyntaxNode>> {
    let name = original.name();
    tree.nodes()
        .into_iter()
        .filter(|node| node.kind() == original.node().kind())
        .filter(|node| {
            MethodLike::from_node(node).is_some_and(|candidate| {
                !candidate.is_static()
                    && candidate.name() == name
                    && is_param_list_equal(&candidate, original)
            })
        })
        .collect()
}
