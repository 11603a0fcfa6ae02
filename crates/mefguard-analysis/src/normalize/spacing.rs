//! Token separation rules for normalized layout.

use crate::syntax::{kinds, SyntaxNode, SyntaxToken};

/// A token together with the context the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct TokenContext<'a> {
    pub token: &'a SyntaxToken,
    pub parent: &'a SyntaxNode,
    pub grandparent: Option<&'a SyntaxNode>,
    pub index: usize,
}

impl TokenContext<'_> {
    fn text(&self) -> &str {
        &self.token.text
    }

    fn parent_kind(&self) -> &'static str {
        self.parent.kind()
    }

    fn is(&self, text: &str) -> bool {
        self.token.text == text
    }

    fn parent_in(&self, kinds: &[&str]) -> bool {
        kinds.contains(&self.parent_kind())
    }

    fn is_first_child(&self) -> bool {
        self.index == 0
    }

    fn is_last_child(&self) -> bool {
        self.index + 1 == self.parent.children().len()
    }
}

/// Node kinds whose braces open an indented, line-broken region.
const BLOCK_BRACE_PARENTS: &[&str] = &[
    kinds::BLOCK,
    kinds::DECLARATION_LIST,
    "switch_body",
    "switch_block",
    "accessor_list",
    "enum_member_declaration_list",
];

/// Parents of a `:` that ends a switch label or statement label.
const LABEL_COLON_PARENTS: &[&str] = &[
    "switch_section",
    "case_switch_label",
    "case_pattern_switch_label",
    "default_switch_label",
    "labeled_statement",
];

/// Parents of a `:` written without a space before it.
const TIGHT_COLON_PARENTS: &[&str] = &[
    "name_colon",
    "attribute_target_specifier",
    kinds::ARGUMENT,
    "attribute_argument",
];

const TYPE_LIST_PARENTS: &[&str] = &[kinds::TYPE_ARGUMENT_LIST, kinds::TYPE_PARAMETER_LIST];

/// Parents of a `[` that hugs the preceding token.
const TIGHT_BRACKET_PARENTS: &[&str] = &[
    "bracketed_argument_list",
    "element_binding_expression",
    "array_rank_specifier",
    "bracketed_parameter_list",
    "implicit_array_creation_expression",
    "implicit_stackalloc_expression",
];

/// Tokens after which `(` is a call or declaration argument list.
const CALL_LIKE_KINDS: &[&str] = &[
    kinds::IDENTIFIER,
    ")",
    "]",
    "this",
    "base",
    "typeof",
    "sizeof",
    "nameof",
    "default",
    "checked",
    "unchecked",
    "new",
    "predefined_type",
];

/// Declarations whose attribute lists stand on their own line.
fn is_declaration_level(kind: &str) -> bool {
    kind.ends_with("_declaration")
        || kind == kinds::COMPILATION_UNIT
        || kind == "local_function_statement"
}

pub fn is_block_open(ctx: &TokenContext<'_>) -> bool {
    ctx.is("{") && ctx.parent_in(BLOCK_BRACE_PARENTS)
}

pub fn is_block_close(ctx: &TokenContext<'_>) -> bool {
    ctx.is("}") && ctx.parent_in(BLOCK_BRACE_PARENTS)
}

/// Whether `next` starts a new line after `prev`.
pub fn newline_between(prev: &TokenContext<'_>, next: &TokenContext<'_>) -> bool {
    if is_block_open(next) || is_block_close(next) || is_block_open(prev) {
        return true;
    }
    if is_block_close(prev) {
        return !matches!(next.text(), ";" | "," | ")" | "]" | ".");
    }
    if prev.is(";") {
        return prev.parent_kind() != "for_statement";
    }
    if prev.is("]") {
        if prev.parent_kind() == "global_attribute" {
            return true;
        }
        if prev.parent_kind() == kinds::ATTRIBUTE_LIST {
            return prev
                .grandparent
                .is_some_and(|g| is_declaration_level(g.kind()));
        }
    }
    if prev.is(":") && prev.parent_in(LABEL_COLON_PARENTS) {
        return true;
    }
    false
}

/// Whether a single space separates `prev` and `next` on the same line.
pub fn space_between(prev: &TokenContext<'_>, next: &TokenContext<'_>) -> bool {
    let tight = is_tight(prev, next);
    if tight && would_fuse(prev, next) {
        return true;
    }
    !tight
}

fn is_tight(prev: &TokenContext<'_>, next: &TokenContext<'_>) -> bool {
    if matches!(next.text(), "," | ";" | ")" | "]") {
        return true;
    }
    if next.is(".") || prev.is(".") || next.is("::") || prev.is("::") {
        return true;
    }
    if matches!(prev.text(), "(" | "[") {
        return true;
    }
    if next.is("(") && is_call_like(prev) {
        return true;
    }
    if next.is("[") && next.parent_in(TIGHT_BRACKET_PARENTS) {
        return true;
    }
    if prev.is(")") && prev.parent_kind() == "cast_expression" && !prev.is_last_child() {
        return true;
    }
    if matches!(next.text(), "<" | ">") && next.parent_in(TYPE_LIST_PARENTS) {
        return true;
    }
    if prev.is("<") && prev.parent_in(TYPE_LIST_PARENTS) {
        return true;
    }
    if prev.parent_kind() == "prefix_unary_expression" && prev.is_first_child() {
        return true;
    }
    if next.parent_kind() == "postfix_unary_expression" && next.is_last_child() {
        return true;
    }
    if next.is(":") && (next.parent_in(TIGHT_COLON_PARENTS) || next.parent_in(LABEL_COLON_PARENTS)) {
        return true;
    }
    if next.is("?") && next.parent_in(&["nullable_type", "conditional_access_expression"]) {
        return true;
    }
    if prev.is("?") && prev.parent_kind() == "conditional_access_expression" {
        return true;
    }
    if next.is("*") && next.parent_kind() == "pointer_type" {
        return true;
    }
    false
}

fn is_call_like(prev: &TokenContext<'_>) -> bool {
    if CALL_LIKE_KINDS.contains(&prev.token.kind) || CALL_LIKE_KINDS.contains(&prev.text()) {
        return true;
    }
    prev.is(">") && prev.parent_in(TYPE_LIST_PARENTS)
}

const OPERATOR_CHARS: &str = "+-*/%&|^!~<>=?:";

/// Two tokens that would lex as one if written without a separator.
fn would_fuse(prev: &TokenContext<'_>, next: &TokenContext<'_>) -> bool {
    if prev.parent_in(TYPE_LIST_PARENTS) && next.parent_in(TYPE_LIST_PARENTS) {
        return false;
    }
    let (Some(a), Some(b)) = (prev.text().chars().last(), next.text().chars().next()) else {
        return false;
    };
    let word = |c: char| c.is_alphanumeric() || c == '_' || c == '@';
    (word(a) && word(b)) || (OPERATOR_CHARS.contains(a) && OPERATOR_CHARS.contains(b))
}
