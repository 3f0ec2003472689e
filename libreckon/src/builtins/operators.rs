//! Builtin operators.
//!
//! Priorities, tightest first: `!` (1), `^` (2), `%` (3), prefix `-` and `not` (4), `*` `/` `mod`
//! (5), `+` and infix `-` (6), comparisons (7), `and` `nand` (8), `or` `nor` `xor` (9), `=>` (10),
//! `<=>` (11).

use super::{factorial, logical, power, truth};
use crate::registry::{
    Associativity::*, BuiltinOperator as Builtin, DomainViolation, Operator, Position::*,
};

/// The prefix `-`.
pub(crate) fn negation() -> Operator {
    Operator::new("-", 4, Prefix, Right, |a| Ok(-a[0]))
        .describe("-x = negation of x.")
        .builtin(Builtin::Negate)
}

/// The prefix `not`.
pub(crate) fn logical_not() -> Operator {
    Operator::new("not", 4, Prefix, Right, |a| Ok(logical(!truth(a[0]))))
        .describe("Logical not.")
        .builtin(Builtin::Not)
}

pub(super) fn operators() -> Vec<Operator> {
    vec![
        Operator::new("!", 1, Postfix, Left, |a| factorial(a[0]))
            .describe("x! = factorial of x. Domain x: {0, 1, 2, ...}."),
        Operator::new("^", 2, Infix, Right, |a| power(a[0], a[1]))
            .describe("x ^ y = x raised to the power y. Domain x: [0; +inf) for |y| < 1.")
            .builtin(Builtin::Power),
        Operator::new("%", 3, Postfix, Left, |a| Ok(a[0] / 100.))
            .describe("x% = x percent, x / 100."),
        negation(),
        logical_not(),
        Operator::new("*", 5, Infix, Both, |a| Ok(a[0] * a[1]))
            .describe("Multiplication.")
            .builtin(Builtin::Multiply),
        Operator::new("/", 5, Infix, Left, |a| Ok(a[0] / a[1]))
            .describe("Division.")
            .builtin(Builtin::Divide),
        Operator::new("mod", 5, Infix, Left, |a| {
            if a[1] == 0. {
                return Err(DomainViolation::new(2, a[1], "(-inf, 0) u (0, +inf)"));
            }
            Ok(a[0] % a[1])
        })
        .describe("x mod y = remainder of x / y, with the sign of x. Domain y: nonzero."),
        Operator::new("+", 6, Infix, Both, |a| Ok(a[0] + a[1]))
            .describe("Addition.")
            .builtin(Builtin::Add),
        Operator::new("-", 6, Infix, Left, |a| Ok(a[0] - a[1]))
            .describe("Subtraction.")
            .builtin(Builtin::Subtract),
        Operator::new("=", 7, Infix, Left, |a| Ok(logical(a[0] == a[1]))).describe("Equal."),
        Operator::new("<>", 7, Infix, Left, |a| Ok(logical(a[0] != a[1])))
            .describe("Not equal."),
        Operator::new("<", 7, Infix, Left, |a| Ok(logical(a[0] < a[1]))).describe("Less than."),
        Operator::new(">", 7, Infix, Left, |a| Ok(logical(a[0] > a[1])))
            .describe("Greater than."),
        Operator::new("<=", 7, Infix, Left, |a| Ok(logical(a[0] <= a[1])))
            .describe("Less than or equal."),
        Operator::new(">=", 7, Infix, Left, |a| Ok(logical(a[0] >= a[1])))
            .describe("Greater than or equal."),
        Operator::new("and", 8, Infix, Both, |a| {
            Ok(logical(truth(a[0]) && truth(a[1])))
        })
        .describe("Logical and.")
        .builtin(Builtin::And),
        Operator::new("nand", 8, Infix, Both, |a| {
            Ok(logical(!(truth(a[0]) && truth(a[1]))))
        })
        .describe("Logical nand.")
        .builtin(Builtin::Nand),
        Operator::new("or", 9, Infix, Both, |a| Ok(logical(truth(a[0]) || truth(a[1]))))
            .describe("Logical or.")
            .builtin(Builtin::Or),
        Operator::new("nor", 9, Infix, Both, |a| {
            Ok(logical(!(truth(a[0]) || truth(a[1]))))
        })
        .describe("Logical nor.")
        .builtin(Builtin::Nor),
        Operator::new("xor", 9, Infix, Both, |a| Ok(logical(truth(a[0]) != truth(a[1]))))
            .describe("Logical exclusive or.")
            .builtin(Builtin::Xor),
        Operator::new("=>", 10, Infix, Right, |a| Ok(logical(!truth(a[0]) || truth(a[1]))))
            .describe("Logical implication."),
        Operator::new("<=>", 11, Infix, Both, |a| Ok(logical(truth(a[0]) == truth(a[1]))))
            .describe("Logical equivalence."),
    ]
}
