//! Body replacement with layout for the synthesized code only.
//!
//! The new body is spliced in, the whole tree is normalized so the body gets
//! consistent indentation, and the normalized declaration is then patched
//! back into the un-normalized tree with its original parameter list,
//! attribute lists and leading trivia. Everything outside the body keeps its
//! bytes.

use mefguard_core::config::RelocationStrategy;
use mefguard_core::errors::RewriteError;

use super::signature::find_specific_declaration;
use crate::declarations::method_like::{with_attribute_lists, with_body, with_parameter_list};
use crate::declarations::MethodLike;
use crate::normalize::{normalize_whitespace, FormatOptions};
use crate::syntax::{NodeId, SyntaxNode, SyntaxTree, TrackingMarker};

#[derive(Debug, Clone, Default)]
pub struct TreeRewriter {
    format: FormatOptions,
    relocation: RelocationStrategy,
}

impl TreeRewriter {
    pub fn new(format: FormatOptions, relocation: RelocationStrategy) -> Self {
        Self { format, relocation }
    }

    pub fn format(&self) -> &FormatOptions {
        &self.format
    }

    /// New tree where declaration `target` has `replacement_body` as its
    /// block. The input tree is left untouched.
    pub fn rewrite(
        &self,
        tree: &SyntaxTree,
        target: NodeId,
        replacement_body: SyntaxNode,
    ) -> Result<SyntaxTree, RewriteError> {
        let original_node = tree
            .find_node(target)
            .ok_or(RewriteError::NodeNotFound { id: target.raw() })?;
        let original =
            MethodLike::from_node(original_node).ok_or_else(|| RewriteError::UnsupportedTarget {
                kind: original_node.kind().to_string(),
            })?;
        let original_params = original.parameter_list().cloned();
        let original_attributes: Vec<_> = original.attribute_lists().into_iter().cloned().collect();
        let original_leading = original_node
            .first_token()
            .map(|t| t.leading.clone())
            .unwrap_or_default();

        let marker = TrackingMarker::fresh();
        let replaced = with_body(&original_node.with_marker(marker), replacement_body)?;
        let tree1 = tree.replace_node(target, replaced)?;

        let normalized = normalize_whitespace(&tree1, &self.format);
        let normalized_target = self.relocate(&normalized, marker, &original)?;

        let mut restored = match &original_params {
            Some(params) => with_parameter_list(normalized_target, params)?,
            None => normalized_target.with_children(normalized_target.children().to_vec()),
        };
        restored = with_attribute_lists(&restored, &original_attributes);
        restored = restored.with_leading_trivia(original_leading).without_markers();

        let in_tree1 = self.relocate(&tree1, marker, &original)?.id();
        let result = tree1.replace_node(in_tree1, restored)?;
        tracing::debug!(
            declaration = ?original.name(),
            strategy = %self.relocation,
            "rewrote declaration body"
        );
        Ok(result)
    }

    /// The one node the edited declaration became in `tree`.
    fn relocate<'t>(
        &self,
        tree: &'t SyntaxTree,
        marker: TrackingMarker,
        original: &MethodLike<'_>,
    ) -> Result<&'t std::sync::Arc<SyntaxNode>, RewriteError> {
        let matches = match self.relocation {
            RelocationStrategy::Marker => tree.find_by_marker(marker),
            RelocationStrategy::Signature => find_specific_declaration(tree, original),
        };
        match matches.as_slice() {
            [single] => Ok(*single),
            _ => {
                tracing::error!(
                    declaration = ?original.name(),
                    strategy = %self.relocation,
                    matches = matches.len(),
                    "edited declaration could not be re-identified"
                );
                Err(RewriteError::Relocation {
                    strategy: self.relocation.name().to_string(),
                    matches: matches.len(),
                })
            }
        }
    }
}
