//! Assembles resolved tokens into an expression tree.
//!
//! This is an operator-precedence parser in the shunting-yard family. Operators wait on a stack
//! until an operator binding looser than them arrives, and are then flushed to an output queue in
//! postfix order. A second pass folds the queue into a tree with a value stack.
//!
//! Function calls never enter the operator stack: their parenthesized argument list is split at
//! top-level commas and every argument is built recursively, so a call reaches the output queue
//! as a finished node.

use super::ParseError;
use crate::grammar::{Apply, Expr, RcExpr};
use crate::registry::{Associativity, Operator, Position, Registry};
use crate::resolver::types::{Token, TokenType};

use std::rc::Rc;

/// Builds the tree of a resolved token sequence.
pub fn build(registry: &Registry, tokens: &[Token]) -> Result<RcExpr, ParseError> {
    TreeBuilder::new(registry).build(tokens)
}

/// An entry of the postfix output queue.
enum Item {
    /// A finished subtree: a value, a variable or a function call.
    Node(RcExpr),
    /// An operator still waiting for its operands.
    Operator(Rc<Operator>),
}

struct TreeBuilder<'a> {
    registry: &'a Registry,
}

impl<'a> TreeBuilder<'a> {
    fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    fn build(&self, tokens: &[Token]) -> Result<RcExpr, ParseError> {
        let output = self.to_postfix(tokens)?;
        assemble(output)
    }

    fn to_postfix(&self, tokens: &[Token]) -> Result<Vec<Item>, ParseError> {
        let mut output = Vec::with_capacity(tokens.len());
        let mut operators: Vec<Rc<Operator>> = Vec::new();
        // Depth of the operator stack at each unclosed parenthesis.
        let mut marks: Vec<usize> = Vec::new();

        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            match token.ty {
                TokenType::Immediate => {
                    let value = token.text.parse().map_err(|_| ParseError::MalformedTree)?;
                    output.push(Item::Node(Rc::new(Expr::Immediate(value))));
                }
                TokenType::Constant => {
                    let constant = self
                        .registry
                        .constant(&token.text)
                        .ok_or(ParseError::MalformedTree)?;
                    output.push(Item::Node(Rc::new(Expr::Immediate(constant.value))));
                }
                TokenType::Variable => {
                    output.push(Item::Node(Rc::new(Expr::Variable(token.text.clone()))));
                }
                TokenType::Prefix | TokenType::Infix | TokenType::Postfix => {
                    let op = self.operator(token)?;
                    let floor = marks.last().copied().unwrap_or(0);
                    while operators.len() > floor {
                        let top = &operators[operators.len() - 1];
                        if !pops(top, &op) {
                            break;
                        }
                        log::trace!("{} {} flushes {}", op.position, op.name, top.name);
                        if let Some(top) = operators.pop() {
                            output.push(Item::Operator(top));
                        }
                    }
                    operators.push(op);
                }
                TokenType::Function => {
                    let (call, next) = self.call(tokens, i)?;
                    output.push(Item::Node(call));
                    i = next;
                    continue;
                }
                TokenType::ParenLeft => marks.push(operators.len()),
                TokenType::ParenRight => {
                    let floor = marks.pop().ok_or(ParseError::MalformedTree)?;
                    while operators.len() > floor {
                        if let Some(op) = operators.pop() {
                            output.push(Item::Operator(op));
                        }
                    }
                }
                TokenType::Begin | TokenType::End | TokenType::DecimalPoint | TokenType::Comma => {
                    return Err(ParseError::MalformedTree);
                }
            }
            i += 1;
        }

        while let Some(op) = operators.pop() {
            output.push(Item::Operator(op));
        }
        Ok(output)
    }

    /// The registration a resolved operator token refers to.
    fn operator(&self, token: &Token) -> Result<Rc<Operator>, ParseError> {
        let position = token.ty.position().ok_or(ParseError::MalformedTree)?;
        self.registry
            .operator(&token.text, position)
            .cloned()
            .ok_or(ParseError::MalformedTree)
    }

    /// Builds the function call whose name is at `tokens[start]`. Returns the call and the index
    /// of the first token after its closing parenthesis.
    fn call(&self, tokens: &[Token], start: usize) -> Result<(RcExpr, usize), ParseError> {
        let name = &tokens[start];
        match tokens.get(start + 1) {
            Some(token) if token.ty == TokenType::ParenLeft => {}
            _ => return Err(ParseError::MalformedTree),
        }

        let mut args = Vec::new();
        let mut arg_start = start + 2;
        let mut depth = 0usize;
        let mut i = arg_start;
        let end = loop {
            let token = tokens.get(i).ok_or(ParseError::MalformedTree)?;
            match token.ty {
                TokenType::ParenLeft => depth += 1,
                TokenType::ParenRight if depth > 0 => depth -= 1,
                TokenType::ParenRight => {
                    if i > arg_start {
                        args.push(self.build(&tokens[arg_start..i])?);
                    }
                    break i;
                }
                TokenType::Comma if depth == 0 => {
                    args.push(self.build(&tokens[arg_start..i])?);
                    arg_start = i + 1;
                }
                _ => {}
            }
            i += 1;
        };

        let mut candidates = self
            .registry
            .functions_named(&name.text)
            .iter()
            .filter(|f| f.arity.accepts(args.len()));
        let function = match (candidates.next(), candidates.next()) {
            (Some(function), None) => Rc::clone(function),
            (None, _) => {
                return Err(ParseError::UnresolvedFunction {
                    name: name.text.clone(),
                    arity: args.len(),
                    span: name.span,
                })
            }
            (Some(_), Some(_)) => {
                return Err(ParseError::AmbiguousFunction {
                    name: name.text.clone(),
                    arity: args.len(),
                    span: name.span,
                })
            }
        };

        log::trace!("call {} with {} arguments", function.name, args.len());
        Ok((Rc::new(Apply::new(function, args).into()), end + 1))
    }
}

/// Whether the stacked operator `top` must be applied before `op` is pushed.
fn pops(top: &Operator, op: &Operator) -> bool {
    match op.position {
        Position::Prefix => false,
        Position::Infix => {
            if top.position != Position::Postfix && top.priority > op.priority {
                false
            } else {
                // Right-grouping chains wait for their own right operand.
                !(top.position == Position::Infix
                    && top.priority == op.priority
                    && top.name == op.name
                    && op.associativity != Associativity::Left)
            }
        }
        Position::Postfix => top.position == Position::Postfix || top.priority <= op.priority,
    }
}

/// Folds a postfix queue into a single tree.
fn assemble(output: Vec<Item>) -> Result<RcExpr, ParseError> {
    let mut values: Vec<RcExpr> = Vec::new();
    for item in output {
        match item {
            Item::Node(node) => values.push(node),
            Item::Operator(op) => {
                let args = match op.position {
                    Position::Infix => {
                        let rhs = values.pop().ok_or(ParseError::MalformedTree)?;
                        let lhs = values.pop().ok_or(ParseError::MalformedTree)?;
                        vec![lhs, rhs]
                    }
                    Position::Prefix | Position::Postfix => {
                        vec![values.pop().ok_or(ParseError::MalformedTree)?]
                    }
                };
                values.push(Rc::new(Apply::new(op, args).into()));
            }
        }
    }

    match (values.pop(), values.is_empty()) {
        (Some(root), true) => Ok(root),
        _ => Err(ParseError::MalformedTree),
    }
}
