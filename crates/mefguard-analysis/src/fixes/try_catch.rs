//! Synthesis of the replacement body.
//!
//! The synthesized nodes carry no layout; the rewriter normalizes them.

use std::sync::Arc;

use crate::syntax::kinds::{self, field};
use crate::syntax::{SyntaxElement, SyntaxNode, SyntaxToken};

/// First argument of the logging call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchMessage {
    /// A string literal.
    Literal(String),
    /// `<catch variable>.Message`.
    ExceptionMessage,
}

/// Shape of `try { <body> } catch (<Type> <var>) { <Logger>(<msg>, <var>); }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryCatchTemplate {
    pub logger_call: String,
    pub catch_variable: String,
    pub exception_type: String,
    pub message: CatchMessage,
}

impl TryCatchTemplate {
    /// A block holding one try statement whose try block is `original_body`
    /// unchanged.
    pub fn build(&self, original_body: &Arc<SyntaxNode>) -> SyntaxNode {
        let try_statement = SyntaxNode::new(
            kinds::TRY_STATEMENT,
            vec![
                token("try"),
                SyntaxElement::Node(Arc::new(original_body.with_field(Some(field::BODY)))),
                self.catch_clause().into(),
            ],
        );
        block(vec![try_statement.into()])
    }

    fn catch_clause(&self) -> SyntaxNode {
        let declaration = SyntaxNode::new(
            kinds::CATCH_DECLARATION,
            vec![
                token("("),
                dotted_name(&self.exception_type).with_field(Some(field::TYPE)),
                identifier(&self.catch_variable).with_field(Some(field::NAME)),
                token(")"),
            ],
        );
        let log = SyntaxNode::new(
            kinds::EXPRESSION_STATEMENT,
            vec![self.log_invocation().into(), token(";")],
        );
        SyntaxNode::new(
            kinds::CATCH_CLAUSE,
            vec![
                token("catch"),
                declaration.into(),
                block(vec![log.into()]).with_field(Some(field::BODY)).into(),
            ],
        )
    }

    fn log_invocation(&self) -> SyntaxNode {
        let message = match &self.message {
            CatchMessage::Literal(text) => string_literal(text),
            CatchMessage::ExceptionMessage => {
                member_access(identifier(&self.catch_variable), "Message").into()
            }
        };
        let arguments = SyntaxNode::new(
            kinds::ARGUMENT_LIST,
            vec![
                token("("),
                SyntaxNode::new(kinds::ARGUMENT, vec![message]).into(),
                token(","),
                SyntaxNode::new(kinds::ARGUMENT, vec![identifier(&self.catch_variable)]).into(),
                token(")"),
            ],
        );
        SyntaxNode::new(
            kinds::INVOCATION_EXPRESSION,
            vec![
                callee(&self.logger_call).with_field(Some(field::FUNCTION)),
                arguments.with_field(Some(field::ARGUMENTS)).into(),
            ],
        )
    }
}

fn token(text: &'static str) -> SyntaxElement {
    SyntaxToken::new(text, text).into()
}

fn identifier(name: &str) -> SyntaxElement {
    SyntaxToken::new(kinds::IDENTIFIER, name).into()
}

fn block(statements: Vec<SyntaxElement>) -> SyntaxNode {
    let mut children = Vec::with_capacity(statements.len() + 2);
    children.push(token("{"));
    children.extend(statements);
    children.push(token("}"));
    SyntaxNode::new(kinds::BLOCK, children)
}

fn member_access(expression: SyntaxElement, name: &str) -> SyntaxNode {
    SyntaxNode::new(
        kinds::MEMBER_ACCESS_EXPRESSION,
        vec![
            expression.with_field(Some(field::EXPRESSION)),
            token("."),
            identifier(name).with_field(Some(field::NAME)),
        ],
    )
}

/// `A.B.C` as nested member accesses, `A` as a bare identifier.
fn callee(dotted: &str) -> SyntaxElement {
    let mut parts = dotted.split('.').filter(|p| !p.is_empty());
    let first = identifier(parts.next().unwrap_or(dotted));
    parts.fold(first, |expr, part| member_access(expr, part).into())
}

/// `A.B.C` as nested qualified names, `A` as a bare identifier.
pub(crate) fn dotted_name(dotted: &str) -> SyntaxElement {
    let mut parts = dotted.split('.').filter(|p| !p.is_empty());
    let first = identifier(parts.next().unwrap_or(dotted));
    parts.fold(first, |qualifier, part| {
        SyntaxNode::new(
            kinds::QUALIFIED_NAME,
            vec![
                qualifier.with_field(Some(field::QUALIFIER)),
                token("."),
                identifier(part).with_field(Some(field::NAME)),
            ],
        )
        .into()
    })
}

fn string_literal(text: &str) -> SyntaxElement {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    SyntaxNode::new(
        kinds::STRING_LITERAL,
        vec![
            token("\""),
            SyntaxToken::new("string_literal_content", escaped).into(),
            token("\""),
        ],
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxTree;

    fn template(message: CatchMessage) -> TryCatchTemplate {
        TryCatchTemplate {
            logger_call: "Log.Error".to_string(),
            catch_variable: "e".to_string(),
            exception_type: "System.Exception".to_string(),
            message,
        }
    }

    fn body() -> Arc<SyntaxNode> {
        Arc::new(block(vec![]))
    }

    #[test]
    fn test_build_tokens_without_layout() {
        let built = template(CatchMessage::Literal("boom".to_string())).build(&body());
        let text = SyntaxTree::new(built).text();
        assert_eq!(
            text,
            "{try{}catch(System.Exceptione){Log.Error(\"boom\",e);}}"
        );
    }

    #[test]
    fn test_exception_message_argument() {
        let built = template(CatchMessage::ExceptionMessage).build(&body());
        assert!(SyntaxTree::new(built).text().contains("Log.Error(e.Message,e)"));
    }

    #[test]
    fn test_literal_is_escaped() {
        let built = template(CatchMessage::Literal("a \"b\"".to_string())).build(&body());
        assert!(SyntaxTree::new(built).text().contains(r#""a \"b\"""#));
    }
}
