//! ERROR and MISSING node accounting on the raw tree-sitter tree.

use tree_sitter::Node;

use crate::syntax::TextRange;

/// Count ERROR and MISSING nodes and collect their byte ranges.
pub fn count_errors(root: Node) -> (u32, Vec<TextRange>) {
    let mut count = 0u32;
    let mut ranges = Vec::new();
    collect_errors(root, &mut count, &mut ranges);
    (count, ranges)
}

fn collect_errors(node: Node, count: &mut u32, ranges: &mut Vec<TextRange>) {
    if node.is_error() || node.is_missing() {
        *count += 1;
        ranges.push(TextRange::new(node.start_byte(), node.end_byte()));
        // Children of an ERROR node are part of the same failure.
        if node.is_error() {
            return;
        }
    }
    if !node.has_error() {
        return;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_errors(child, count, ranges);
        }
    }
}
