//! The token grammar: for each token type, the token types allowed right before it.

use super::types::TokenType;
use TokenType::*;

const OPERAND_END: &[TokenType] = &[Immediate, Constant, Variable, Postfix, ParenRight];
const OPERAND_START: &[TokenType] = &[Begin, Prefix, Infix, ParenLeft, Comma];

/// The token types allowed to precede `ty`.
pub fn predecessors(ty: TokenType) -> &'static [TokenType] {
    match ty {
        Begin | DecimalPoint => &[],
        End => &[Begin, Immediate, Constant, Variable, Postfix, ParenRight],
        Immediate | Constant | Variable | Prefix | Function => OPERAND_START,
        Infix | Postfix | Comma => OPERAND_END,
        ParenLeft => &[Begin, Prefix, Infix, Function, ParenLeft, Comma],
        ParenRight => &[Immediate, Constant, Variable, Postfix, ParenLeft, ParenRight],
    }
}

/// Whether `ty` may directly follow `predecessor`.
pub fn may_follow(predecessor: TokenType, ty: TokenType) -> bool {
    predecessors(ty).contains(&predecessor)
}
