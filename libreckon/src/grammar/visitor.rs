//! Traits for visiting expression trees.

use super::*;

/// Describes an [expression](super::Expr) visitor producing a value per node.
pub trait ExprVisitor<'a> {
    type Output;

    /// Visits an expression.
    fn visit_expr(&mut self, expr: &'a RcExpr) -> Self::Output {
        match expr.as_ref() {
            Expr::Immediate(v) => self.visit_immediate(*v),
            Expr::Variable(name) => self.visit_var(name),
            Expr::Apply(apply) => self.visit_apply(apply),
        }
    }

    /// Visits an immediate value.
    fn visit_immediate(&mut self, value: f64) -> Self::Output;

    /// Visits a variable.
    fn visit_var(&mut self, name: &'a str) -> Self::Output;

    /// Visits an application.
    fn visit_apply(&mut self, apply: &'a Apply) -> Self::Output;
}
