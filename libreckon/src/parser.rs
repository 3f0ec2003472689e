//! Turns an expression string into an [`Expression`].
//!
//! Parsing runs in three stages, each of which may reject the input:
//!
//! 1. parentheses are checked for balance,
//! 2. the [resolver](crate::resolver) splits the source into typed tokens,
//! 3. the [builder](builder) assembles the tokens into a tree.

mod builder;
pub(crate) mod errors;

pub use errors::ParseError;

use crate::common::Span;
use crate::expression::Expression;
use crate::registry::Registry;
use crate::resolver;

pub(crate) fn parse(registry: &Registry, source: &str) -> Result<Expression, ParseError> {
    check_parentheses(source)?;
    if source.trim().is_empty() {
        return Err(ParseError::Unresolved);
    }

    let tokens = resolver::resolve(registry, source)?;
    log::debug!("resolved {} tokens from {:?}", tokens.len(), source);

    let root = builder::build(registry, &tokens)?;
    Ok(Expression::new(root))
}

/// Checks that every parenthesis is matched. On failure, points at a `)` closing nothing or at
/// the last `(` left open.
fn check_parentheses(source: &str) -> Result<(), ParseError> {
    let mut open = Vec::new();
    for (i, c) in source.chars().enumerate() {
        match c {
            '(' => open.push(i),
            ')' => {
                if open.pop().is_none() {
                    return Err(ParseError::ImbalancedParentheses { span: Span::at(i) });
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(i) => Err(ParseError::ImbalancedParentheses { span: Span::at(i) }),
        None => Ok(()),
    }
}
