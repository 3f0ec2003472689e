//! Definitions of types used in the libreckon resolver.

use crate::common::Span;
use crate::registry::Position;
use core::fmt;

/// The type of a [Token][Token].
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum TokenType {
    /// Start of the expression. Never materialized as a token.
    Begin,

    /// End of the expression. Never materialized as a token.
    End,

    /// A non-negative numeric literal.
    Immediate,

    /// A registered constant.
    Constant,

    /// A registered variable.
    Variable,

    /// An operator applied before its operand.
    Prefix,

    /// An operator applied between its operands.
    Infix,

    /// An operator applied after its operand.
    Postfix,

    /// A registered function name.
    Function,

    /// ( symbol
    ParenLeft,

    /// ) symbol
    ParenRight,

    /// Reserved. Decimal points are part of [Immediate](TokenType::Immediate) tokens and no
    /// grammar rule admits a standalone one.
    DecimalPoint,

    /// , symbol
    Comma,
}

impl TokenType {
    /// The operator token type for operators registered in `position`.
    pub fn of_position(position: Position) -> Self {
        match position {
            Position::Prefix => TokenType::Prefix,
            Position::Infix => TokenType::Infix,
            Position::Postfix => TokenType::Postfix,
        }
    }

    /// The operator position this token type stands for, if it is an operator.
    pub fn position(self) -> Option<Position> {
        match self {
            TokenType::Prefix => Some(Position::Prefix),
            TokenType::Infix => Some(Position::Infix),
            TokenType::Postfix => Some(Position::Postfix),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenType::*;
        f.write_str(match self {
            Begin => "beginning of expression",
            End => "end of expression",
            Immediate => "number",
            Constant => "constant",
            Variable => "variable",
            Prefix => "prefix operator",
            Infix => "infix operator",
            Postfix => "postfix operator",
            Function => "function",
            ParenLeft => "(",
            ParenRight => ")",
            DecimalPoint => ".",
            Comma => ",",
        })
    }
}

/// Describes a resolved token of an expression.
#[derive(PartialEq, Clone, Debug)]
pub struct Token {
    /// The lowercased source text of the token.
    pub text: String,
    /// The type the token was resolved to.
    pub ty: TokenType,
    /// The source span of the token, in characters.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new<T, Sp>(text: T, ty: TokenType, span: Sp) -> Self
    where
        T: Into<String>,
        Sp: Into<Span>,
    {
        Self {
            text: text.into(),
            ty,
            span: span.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.ty)
    }
}
