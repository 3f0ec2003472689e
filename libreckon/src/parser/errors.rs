//! Errors produced while parsing an expression.

use crate::common::Span;
use crate::diagnostics::{Diagnostic, DiagnosticRecord};

use core::fmt;

/// Why an expression could not be parsed.
#[derive(PartialEq, Clone, Debug)]
pub enum ParseError {
    /// A `)` closes nothing, or a `(` is never closed. The span points at the offending
    /// parenthesis.
    ImbalancedParentheses { span: Span },
    /// No way of splitting the expression into tokens fits the grammar.
    Unresolved,
    /// More than one way of splitting the expression into tokens fits the grammar.
    Ambiguous,
    /// No function registered under `name` takes `arity` arguments.
    UnresolvedFunction {
        name: String,
        arity: usize,
        span: Span,
    },
    /// Several functions registered under `name` take `arity` arguments.
    AmbiguousFunction {
        name: String,
        arity: usize,
        span: Span,
    },
    /// The tokens resolved but do not assemble into a single tree.
    MalformedTree,
}

impl ParseError {
    /// The diagnostic code of this error.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::ImbalancedParentheses { .. } => ImbalancedParentheses::CODE,
            ParseError::Unresolved | ParseError::UnresolvedFunction { .. } => {
                UnresolvedExpression::CODE
            }
            ParseError::Ambiguous | ParseError::AmbiguousFunction { .. } => {
                AmbiguousExpression::CODE
            }
            ParseError::MalformedTree => MalformedTree::CODE,
        }
    }

    /// Converts the error into a diagnostic over the `source` it was produced from.
    pub fn diagnostic(&self, source: &str) -> Diagnostic {
        let whole = Span::new(0, source.chars().count());
        let title = self.to_string();
        match self {
            ParseError::ImbalancedParentheses { span } => Diagnostic::span_err(
                *span,
                title,
                self.code(),
                "unmatched parenthesis".to_owned(),
            ),
            ParseError::Unresolved => {
                Diagnostic::span_err(whole, title, self.code(), None::<String>).with_help(
                    "check that every name is a registered constant, variable, operator or function",
                )
            }
            ParseError::Ambiguous => {
                Diagnostic::span_err(whole, title, self.code(), None::<String>)
                    .with_help("separate names with spaces or parentheses to leave one reading")
            }
            ParseError::UnresolvedFunction { name, arity, span } => Diagnostic::span_err(
                *span,
                title,
                self.code(),
                format!("`{}` called with {} argument{}", name, arity, plural(*arity)),
            ),
            ParseError::AmbiguousFunction { name, arity, span } => Diagnostic::span_err(
                *span,
                title,
                self.code(),
                format!("several `{}` take {} argument{}", name, arity, plural(*arity)),
            ),
            ParseError::MalformedTree => {
                Diagnostic::span_err(whole, title, self.code(), None::<String>)
            }
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ImbalancedParentheses { .. } => f.write_str("Imbalanced parentheses"),
            ParseError::Unresolved => f.write_str("Expression cannot be resolved"),
            ParseError::Ambiguous => f.write_str("Expression is ambiguous"),
            ParseError::UnresolvedFunction { name, arity, .. } => write!(
                f,
                "Expression cannot be resolved: no function '{}' takes {} argument{}",
                name,
                arity,
                plural(*arity)
            ),
            ParseError::AmbiguousFunction { name, arity, .. } => write!(
                f,
                "Expression is ambiguous: several functions '{}' take {} argument{}",
                name,
                arity,
                plural(*arity)
            ),
            ParseError::MalformedTree => f.write_str("Cannot create AST"),
        }
    }
}

impl std::error::Error for ParseError {}

define_errors! {
    ParseErrors;

    ///This error fires on expressions whose parentheses do not pair up.
    ///
    ///Every `(` must be closed by a later `)`, and a `)` may only close a `(` that comes before it.
    ///The following expressions emit this error:
    ///
    ///```text
    ///(1 + 2
    ///^- never closed
    ///```
    ///
    ///```text
    ///1 + 2) * (3
    ///     ^- closes nothing
    ///```
    ///
    ///Parentheses are checked before anything else, so this error hides any other problem in the
    ///expression.
    P0001: ImbalancedParentheses

    ///This error fires on expressions that cannot be split into tokens that fit together.
    ///
    ///Reckon reads an expression as a sequence of numbers, registered names, parentheses and
    ///commas, where each kind of token may only follow certain other kinds. For example, a value
    ///may not directly follow another value, and an infix operator needs a value on both sides.
    ///The following expressions emit this error:
    ///
    ///```text
    ///1 2      - two values with nothing joining them
    ///1 +      - an infix operator missing its right operand
    ///x + 1    - when `x` is not a registered variable
    ///```
    ///
    ///The error also fires when a function is called with a number of arguments no registration
    ///of that function accepts, like `sqrt(1, 2)`.
    P0002: UnresolvedExpression

    ///This error fires on expressions that can be split into tokens in more than one way.
    ///
    ///Names are not separated by any fixed syntax, so with constants `a` and `aa` and infix
    ///operators `+` and `+a` registered, the expression
    ///
    ///```text
    ///a+aa
    ///```
    ///
    ///reads both as `a + aa` and as `a +a a`.
    ///Reckon never guesses. Separate the names with whitespace or parentheses to leave only one
    ///reading.
    ///
    ///The error also fires when several functions registered under the same name accept the
    ///number of arguments a call passes.
    P0003: AmbiguousExpression

    ///This error fires when resolved tokens do not assemble into a single expression tree, like
    ///the empty parentheses in
    ///
    ///```text
    ///()
    ///```
    ///
    ///which resolve as tokens but hold no value.
    P0004: MalformedTree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn messages() {
        assert_eq!(
            ParseError::ImbalancedParentheses { span: Span::at(0) }.to_string(),
            "Imbalanced parentheses"
        );
        assert_eq!(ParseError::Unresolved.to_string(), "Expression cannot be resolved");
        assert_eq!(ParseError::Ambiguous.to_string(), "Expression is ambiguous");
        assert_eq!(ParseError::MalformedTree.to_string(), "Cannot create AST");
        assert_eq!(
            ParseError::UnresolvedFunction {
                name: "sqrt".into(),
                arity: 2,
                span: Span::new(0, 4)
            }
            .to_string(),
            "Expression cannot be resolved: no function 'sqrt' takes 2 arguments"
        );
    }

    #[test]
    fn function_errors_share_codes() {
        let unresolved = ParseError::UnresolvedFunction {
            name: "f".into(),
            arity: 1,
            span: Span::new(0, 1),
        };
        let ambiguous = ParseError::AmbiguousFunction {
            name: "f".into(),
            arity: 1,
            span: Span::new(0, 1),
        };
        assert_eq!(unresolved.code(), ParseError::Unresolved.code());
        assert_eq!(ambiguous.code(), ParseError::Ambiguous.code());
    }

    #[test]
    fn diagnostic_spans() {
        let diag = ParseError::ImbalancedParentheses { span: Span::at(3) }.diagnostic("1 +)");
        assert_eq!(diag.kind, DiagnosticKind::Error);
        assert_eq!(diag.span, Span::new(3, 4));
        assert_eq!(diag.code, Some("P0001"));

        let diag = ParseError::Unresolved.diagnostic("1 2");
        assert_eq!(diag.span, Span::new(0, 3));
        assert_eq!(diag.unspanned_associated_diagnostics.len(), 1);
    }
}
