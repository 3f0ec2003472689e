use super::Pass;
use crate::builtins;
use crate::grammar::{Apply, Expr, RcExpr};
use crate::registry::{BuiltinOperator as Builtin, Function, Operator};

use std::rc::Rc;

/// Applies identity and annihilator laws to infix operators with a literal operand.
///
/// Only literal operands count: `x * (2 - 1)` is left alone until constant folding has turned
/// `2 - 1` into `1`. Logical operators treat values of at least 1 as true and anything else as
/// false.
///
/// The laws belong to the builtin operators, recognized by their [`Builtin`] tag wherever they
/// were registered. A user operator is never rewritten, even one named `+`.
#[derive(Clone, Debug)]
pub struct BinarySimplification {
    negate: Rc<Operator>,
    not: Rc<Operator>,
    to_logical: Rc<Function>,
}

impl Default for BinarySimplification {
    fn default() -> Self {
        Self {
            negate: Rc::new(builtins::negation()),
            not: Rc::new(builtins::logical_not()),
            to_logical: Rc::new(builtins::to_logical()),
        }
    }
}

impl BinarySimplification {
    fn negate(&self, x: &RcExpr) -> Option<RcExpr> {
        Some(Rc::new(Apply::new(Rc::clone(&self.negate), vec![Rc::clone(x)]).into()))
    }

    fn not(&self, x: &RcExpr) -> Option<RcExpr> {
        Some(Rc::new(Apply::new(Rc::clone(&self.not), vec![Rc::clone(x)]).into()))
    }

    fn to_logical(&self, x: &RcExpr) -> Option<RcExpr> {
        Some(Rc::new(Apply::new(Rc::clone(&self.to_logical), vec![Rc::clone(x)]).into()))
    }

    fn simplify(&self, apply: &Apply) -> Option<RcExpr> {
        let (lhs, rhs) = match apply.args.as_slice() {
            [lhs, rhs] => (lhs, rhs),
            _ => return None,
        };
        let builtin = apply.op.builtin()?;
        let l = lhs.immediate();
        let r = rhs.immediate();
        let truthy = |v: Option<f64>| v.map(|v| v >= 1.);
        let (lt, rt) = (truthy(l), truthy(r));

        if builtin == Builtin::Add {
            if l == Some(0.) {
                return Some(Rc::clone(rhs));
            }
            if r == Some(0.) {
                return Some(Rc::clone(lhs));
            }
        } else if builtin == Builtin::And {
            if lt == Some(true) {
                return self.to_logical(rhs);
            }
            if rt == Some(true) {
                return self.to_logical(lhs);
            }
            if lt == Some(false) || rt == Some(false) {
                return Some(immediate(0.));
            }
        } else if builtin == Builtin::Divide {
            if r == Some(1.) {
                return Some(Rc::clone(lhs));
            }
        } else if builtin == Builtin::Multiply {
            if l == Some(0.) || r == Some(0.) {
                return Some(immediate(0.));
            }
            if l == Some(1.) {
                return Some(Rc::clone(rhs));
            }
            if r == Some(1.) {
                return Some(Rc::clone(lhs));
            }
        } else if builtin == Builtin::Nand {
            if lt == Some(true) {
                return self.not(rhs);
            }
            if rt == Some(true) {
                return self.not(lhs);
            }
            if lt == Some(false) || rt == Some(false) {
                return Some(immediate(1.));
            }
        } else if builtin == Builtin::Nor {
            if lt == Some(true) || rt == Some(true) {
                return Some(immediate(0.));
            }
            if lt == Some(false) {
                return self.not(rhs);
            }
            if rt == Some(false) {
                return self.not(lhs);
            }
        } else if builtin == Builtin::Or {
            if lt == Some(true) || rt == Some(true) {
                return Some(immediate(1.));
            }
            if lt == Some(false) {
                return self.to_logical(rhs);
            }
            if rt == Some(false) {
                return self.to_logical(lhs);
            }
        } else if builtin == Builtin::Power {
            if r == Some(0.) {
                return Some(immediate(1.));
            }
            if r == Some(1.) {
                return Some(Rc::clone(lhs));
            }
            if l == Some(0.) {
                return Some(immediate(0.));
            }
            if l == Some(1.) {
                return Some(immediate(1.));
            }
        } else if builtin == Builtin::Subtract {
            if l == Some(0.) {
                return self.negate(rhs);
            }
            if r == Some(0.) {
                return Some(Rc::clone(lhs));
            }
        } else if builtin == Builtin::Xor {
            if lt == Some(false) {
                return self.to_logical(rhs);
            }
            if rt == Some(false) {
                return self.to_logical(lhs);
            }
            if lt == Some(true) {
                return self.not(rhs);
            }
            if rt == Some(true) {
                return self.not(lhs);
            }
        }
        None
    }
}

fn immediate(v: f64) -> RcExpr {
    Rc::new(Expr::Immediate(v))
}

impl Pass for BinarySimplification {
    fn name(&self) -> &str {
        "BinaryOperatorSimplifying"
    }

    fn run(&self, node: &RcExpr) -> Option<RcExpr> {
        match node.as_ref() {
            Expr::Apply(apply) => self.simplify(apply),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Optimizer, Registry};

    use pretty_assertions::assert_eq;

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry.add_variable("x");
        registry.add_variable("y");
        registry
    }

    macro_rules! simplification_tests {
        ($($name:ident: $program:expr => $simplified:expr)*) => {
        $(
            #[test]
            fn $name() {
                let registry = registry();
                let pass = BinarySimplification::default();
                let expr = registry.parse($program).unwrap();
                let simplified = Optimizer::empty().apply(&expr, &pass);
                let expected = registry.parse($simplified).unwrap();
                assert_eq!(simplified.to_string(), expected.to_string());
            }
        )*
        }
    }

    simplification_tests! {
        add_zero_right:     "x + 0" => "x"
        add_zero_left:      "0 + x" => "x"
        and_true_right:     "x and true" => "to_logical(x)"
        and_true_left:      "true and x" => "to_logical(x)"
        and_false_right:    "x and false" => "0"
        and_false_left:     "false and x" => "0"
        div_one:            "x / 1" => "x"
        mul_zero_right:     "x * 0" => "0"
        mul_one_right:      "x * 1" => "x"
        mul_zero_left:      "0 * x" => "0"
        mul_one_left:       "1 * x" => "x"
        nand_true_right:    "x nand true" => "not(x)"
        nand_true_left:     "true nand x" => "not(x)"
        nand_false_right:   "x nand false" => "1"
        nand_false_left:    "false nand x" => "1"
        nor_true_right:     "x nor true" => "0"
        nor_true_left:      "true nor x" => "0"
        nor_false_right:    "x nor false" => "not(x)"
        nor_false_left:     "false nor x" => "not(x)"
        or_true_right:      "x or true" => "1"
        or_true_left:       "true or x" => "1"
        or_false_right:     "x or false" => "to_logical(x)"
        or_false_left:      "false or x" => "to_logical(x)"
        pow_zero:           "x ^ 0" => "1"
        pow_one:            "x ^ 1" => "x"
        zero_pow:           "0 ^ x" => "0"
        one_pow:            "1 ^ x" => "1"
        sub_zero:           "x - 0" => "x"
        zero_sub:           "0 - x" => "-x"
        xor_true_right:     "x xor true" => "not(x)"
        xor_true_left:      "true xor x" => "not(x)"
        xor_false_right:    "x xor false" => "to_logical(x)"
        xor_false_left:     "false xor x" => "to_logical(x)"
        truthy_above_one:   "x and 5" => "to_logical(x)"
        falsy_below_one:    "x or 0.5" => "to_logical(x)"
        no_literal:         "x + y" => "x + y"
        other_operator:     "x mod 1" => "x mod 1"
        first_rule_wins:    "0 * 1" => "0"
    }

    #[test]
    fn user_operators_keep_their_laws() {
        use crate::registry::{Associativity, Operator, Position};

        let mut registry = Registry::empty();
        registry.add_variable("x");
        registry.add_operator(Operator::new("+", 6, Position::Infix, Associativity::Both, |a| {
            Ok(a[0] + a[1] + 1.)
        }));
        let expr = registry.parse("x + 0").unwrap();
        let simplified = Optimizer::empty().apply(&expr, &BinarySimplification::default());
        assert_eq!(simplified.to_string(), expr.to_string());
    }

    #[test]
    fn any_default_registry_simplifies() {
        let expr = registry().parse("(x + 0) * 1 - 0").unwrap();
        let pass = BinarySimplification::default();
        let simplified = Optimizer::empty().apply(&expr, &pass);
        assert_eq!(simplified.to_string(), registry().parse("x").unwrap().to_string());

        let mut negated = Optimizer::empty().apply(&registry().parse("0 - x").unwrap(), &pass);
        negated.set_variable("x", 3.);
        assert_eq!(negated.evaluate(), Ok(-3.));
    }
}
