//! Module `collectors` provides utilities for collecting items in an expression tree.

use crate::grammar::{Apply, ExprVisitor, RcExpr};

use std::collections::BTreeSet;

/// Collects unique variable names in an expression, in sorted order.
pub fn collect_var_names(expr: &RcExpr) -> BTreeSet<&str> {
    let mut collector = VarNameCollector::default();
    collector.visit_expr(expr);
    collector.vars
}
#[derive(Default)]
struct VarNameCollector<'a> {
    vars: BTreeSet<&'a str>,
}
impl<'a> ExprVisitor<'a> for VarNameCollector<'a> {
    type Output = ();

    fn visit_immediate(&mut self, _value: f64) {}

    fn visit_var(&mut self, name: &'a str) {
        self.vars.insert(name);
    }

    fn visit_apply(&mut self, apply: &'a Apply) {
        for arg in &apply.args {
            self.visit_expr(arg);
        }
    }
}
