//! Using-directive insertion.

use crate::declarations::UsingDirective;
use crate::syntax::kinds;
use crate::syntax::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, Trivia};

use super::try_catch::dotted_name;

/// Whether a top-level using directive targets `namespace`. Alias and global
/// directives count by their target.
pub fn has_import(tree: &SyntaxTree, namespace: &str) -> bool {
    tree.root()
        .child_nodes()
        .filter(|n| n.kind() == kinds::USING_DIRECTIVE)
        .filter_map(|n| UsingDirective::from_node(n))
        .any(|u| u.name == namespace)
}

/// `tree` with `using <namespace>;` appended after the last top-level using
/// directive. Unchanged when the namespace is already imported.
///
/// Without any using directive the new one goes after the last `extern alias`
/// directive, or first in the file where it takes over the file's leading
/// trivia followed by a blank line.
pub fn ensure_import(tree: &SyntaxTree, namespace: &str, eol: &str) -> SyntaxTree {
    if has_import(tree, namespace) {
        return tree.clone();
    }
    let root = tree.root();
    let children = root.children();
    let last_of = |kind: &str| children.iter().rposition(|c| c.kind() == kind);

    let mut new_children = children.to_vec();
    match last_of(kinds::USING_DIRECTIVE).or_else(|| last_of(kinds::EXTERN_ALIAS_DIRECTIVE)) {
        Some(anchor) => {
            let directive = using_directive(namespace, vec![Trivia::whitespace(eol)]);
            new_children.insert(anchor + 1, directive.into());
        }
        None => {
            let header = children
                .first()
                .and_then(SyntaxElement::first_token)
                .map(|t| t.leading.clone())
                .unwrap_or_default();
            let directive = using_directive(namespace, header);
            if let Some(first) = new_children.first_mut() {
                *first = first.with_leading_trivia(vec![Trivia::whitespace(format!("{eol}{eol}"))]);
            }
            new_children.insert(0, directive.into());
        }
    }
    tracing::debug!(namespace, "added using directive");
    SyntaxTree::new(root.with_children(new_children))
}

fn using_directive(namespace: &str, leading: Vec<Trivia>) -> SyntaxNode {
    SyntaxNode::new(
        kinds::USING_DIRECTIVE,
        vec![
            SyntaxToken::new("using", "using").with_leading(leading).into(),
            dotted_name(namespace).with_leading_trivia(vec![Trivia::whitespace(" ")]),
            SyntaxToken::new(";", ";").into(),
        ],
    )
}
