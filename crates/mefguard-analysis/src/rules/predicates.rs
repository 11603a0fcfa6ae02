//! Shape checks over a declaration's block body.
//!
//! Comments and preprocessor directives live in trivia, so they never count
//! as statements. An empty statement (`;`) does.

use crate::declarations::MethodLike;
use crate::syntax::kinds;

/// Body has zero statements. `false` when there is no declaration or no
/// block body.
pub fn is_empty_body(decl: Option<&MethodLike<'_>>) -> bool {
    decl.and_then(MethodLike::statements)
        .is_some_and(|statements| statements.is_empty())
}

/// Body is exactly one `try` statement. The catch clauses are not inspected.
pub fn is_single_try_catch_body(decl: Option<&MethodLike<'_>>) -> bool {
    decl.and_then(MethodLike::statements)
        .is_some_and(|statements| {
            statements.len() == 1 && statements[0].kind() == kinds::TRY_STATEMENT
        })
}
