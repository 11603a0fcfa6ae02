//! Whole-tree whitespace normalization.
//!
//! Produces a tree with the same structure and markers but fresh node ids
//! and regenerated leading trivia: Allman braces, one statement per line,
//! single spaces elsewhere. Comments and directives are kept; string and
//! character literals keep their inner text untouched.

pub mod spacing;

use std::sync::Arc;

use mefguard_core::config::FormatConfig;

use crate::syntax::{kinds, SyntaxElement, SyntaxNode, SyntaxTree, Trivia, TriviaKind};
use spacing::TokenContext;

/// Layout parameters for normalized code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// One level of indentation.
    pub indent_unit: String,
    /// Line break sequence.
    pub eol: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            eol: "\n".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn from_config(config: &FormatConfig, source: &str) -> Self {
        Self {
            indent_unit: config.indent_unit(),
            eol: config.effective_end_of_line().resolve(source).to_string(),
        }
    }

    fn line_break(&self, depth: usize) -> String {
        let mut out = String::with_capacity(self.eol.len() + depth * self.indent_unit.len());
        out.push_str(&self.eol);
        for _ in 0..depth {
            out.push_str(&self.indent_unit);
        }
        out
    }
}

/// Kinds whose inner tokens are emitted exactly as written.
const VERBATIM_KINDS: &[&str] = &[
    kinds::STRING_LITERAL,
    kinds::VERBATIM_STRING_LITERAL,
    kinds::RAW_STRING_LITERAL,
    kinds::INTERPOLATED_STRING_EXPRESSION,
    kinds::CHARACTER_LITERAL,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbatim {
    No,
    /// First token of a verbatim node: laid out normally.
    First,
    /// Inside a verbatim node: leading trivia kept.
    Inner,
}

struct FlatToken<'a> {
    ctx: TokenContext<'a>,
    verbatim: Verbatim,
    /// Extra indentation for statements under a switch label.
    switch_extra: usize,
}

pub fn normalize_whitespace(tree: &SyntaxTree, options: &FormatOptions) -> SyntaxTree {
    let mut flat = Vec::new();
    flatten(tree.root(), None, false, 0, &mut flat);
    let leading = layout(&flat, options);
    let mut next = 0;
    let root = rebuild(tree.root(), &leading, &mut next);
    tracing::trace!(tokens = flat.len(), "normalized tree");
    SyntaxTree::new(root)
}

fn is_statement_kind(kind: &str) -> bool {
    kind.ends_with("_statement") || kind == kinds::BLOCK
}

fn flatten<'a>(
    node: &'a SyntaxNode,
    parent: Option<&'a SyntaxNode>,
    inside_verbatim: bool,
    switch_extra: usize,
    out: &mut Vec<FlatToken<'a>>,
) {
    for (index, child) in node.children().iter().enumerate() {
        match child {
            SyntaxElement::Token(token) => out.push(FlatToken {
                ctx: TokenContext {
                    token,
                    parent: node,
                    grandparent: parent,
                    index,
                },
                verbatim: if inside_verbatim {
                    Verbatim::Inner
                } else {
                    Verbatim::No
                },
                switch_extra,
            }),
            SyntaxElement::Node(child_node) => {
                let extra = if node.kind() == "switch_section" && is_statement_kind(child_node.kind()) {
                    switch_extra + 1
                } else {
                    switch_extra
                };
                let starts_verbatim =
                    !inside_verbatim && VERBATIM_KINDS.contains(&child_node.kind());
                let start = out.len();
                flatten(child_node, Some(node), inside_verbatim || starts_verbatim, extra, out);
                if starts_verbatim {
                    if let Some(first) = out.get_mut(start) {
                        first.verbatim = Verbatim::First;
                    }
                }
            }
        }
    }
}

/// Comments and directives lifted out of a token's original trivia.
struct TriviaItem<'a> {
    trivia: &'a Trivia,
    newline_before: bool,
    newline_after: bool,
}

fn trivia_items(leading: &[Trivia]) -> Vec<TriviaItem<'_>> {
    let mut items: Vec<TriviaItem<'_>> = Vec::new();
    let mut saw_newline = false;
    for trivia in leading {
        match trivia.kind {
            TriviaKind::Whitespace => {
                if trivia.contains_newline() {
                    saw_newline = true;
                    if let Some(last) = items.last_mut() {
                        last.newline_after = true;
                    }
                }
            }
            _ => {
                items.push(TriviaItem {
                    trivia,
                    newline_before: saw_newline,
                    newline_after: false,
                });
                saw_newline = false;
            }
        }
    }
    items
}

/// A directive without its line terminator; the layout emits the break.
fn directive_line(trivia: &Trivia) -> Trivia {
    Trivia::directive(trivia.text.trim_end_matches(['\r', '\n']))
}

fn layout(flat: &[FlatToken<'_>], options: &FormatOptions) -> Vec<Vec<Trivia>> {
    let mut result = Vec::with_capacity(flat.len());
    let mut depth = 0usize;
    let mut prev: Option<&TokenContext<'_>> = None;

    for item in flat {
        let token = item.ctx.token;
        let is_eof = token.kind == kinds::END_OF_FILE;
        if item.verbatim == Verbatim::Inner || (token.text.is_empty() && !is_eof) {
            result.push(token.leading.clone());
            if item.verbatim == Verbatim::Inner {
                prev = Some(&item.ctx);
            }
            continue;
        }

        let closes = spacing::is_block_close(&item.ctx);
        let comment_depth = depth + item.switch_extra;
        if closes {
            depth = depth.saturating_sub(1);
        }
        let token_depth = depth + item.switch_extra;

        let mut leading = Vec::new();
        let mut need_newline = false;
        for (i, trivia_item) in trivia_items(&token.leading).into_iter().enumerate() {
            let at_start = prev.is_none() && i == 0;
            let is_directive = trivia_item.trivia.kind == TriviaKind::Directive;
            let separator = if at_start {
                String::new()
            } else if need_newline || trivia_item.newline_before || is_directive {
                options.line_break(comment_depth)
            } else if i == 0 && prev.is_some_and(|p| !spacing::space_between(p, &item.ctx)) {
                String::new()
            } else {
                " ".to_string()
            };
            if !separator.is_empty() {
                leading.push(Trivia::whitespace(separator));
            }
            leading.push(if is_directive {
                directive_line(trivia_item.trivia)
            } else {
                trivia_item.trivia.clone()
            });
            need_newline = trivia_item.trivia.is_line_comment()
                || is_directive
                || trivia_item.newline_after;
        }
        let had_trivia = !leading.is_empty();

        let separator = match prev {
            _ if is_eof => {
                if need_newline {
                    options.eol.clone()
                } else {
                    String::new()
                }
            }
            None if had_trivia && need_newline => options.line_break(token_depth),
            None if had_trivia => " ".to_string(),
            None => String::new(),
            Some(p) => {
                if need_newline || spacing::newline_between(p, &item.ctx) {
                    options.line_break(token_depth)
                } else if had_trivia || spacing::space_between(p, &item.ctx) {
                    " ".to_string()
                } else {
                    String::new()
                }
            }
        };
        if !separator.is_empty() {
            leading.push(Trivia::whitespace(separator));
        }
        result.push(leading);

        if spacing::is_block_open(&item.ctx) {
            depth += 1;
        }
        prev = Some(&item.ctx);
    }
    result
}

fn rebuild(node: &SyntaxNode, leading: &[Vec<Trivia>], next: &mut usize) -> SyntaxNode {
    let children = node
        .children()
        .iter()
        .map(|child| match child {
            SyntaxElement::Token(token) => {
                let trivia = leading.get(*next).cloned().unwrap_or_default();
                *next += 1;
                SyntaxElement::Token(token.clone().with_leading(trivia))
            }
            SyntaxElement::Node(n) => SyntaxElement::Node(Arc::new(rebuild(n, leading, next))),
        })
        .collect();
    node.with_children(children)
}
