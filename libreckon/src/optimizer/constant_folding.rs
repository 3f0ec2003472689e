use super::Pass;
use crate::grammar::{Expr, RcExpr};

use std::rc::Rc;

/// Replaces an operation whose arguments are all literal values with its result.
///
/// Operations that reject their arguments are left in place, so evaluating the expression
/// reports the same error it would have reported unoptimized. Impure functions like `rand` are
/// never folded.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantFolding;

impl Pass for ConstantFolding {
    fn name(&self) -> &str {
        "ConstantFolding"
    }

    fn run(&self, node: &RcExpr) -> Option<RcExpr> {
        let apply = match node.as_ref() {
            Expr::Apply(apply) => apply,
            _ => return None,
        };
        if !apply.op.is_pure() {
            return None;
        }
        let args = apply
            .args
            .iter()
            .map(|arg| arg.immediate())
            .collect::<Option<Vec<_>>>()?;
        let value = apply.op.evaluate(&args).ok()?;
        Some(Rc::new(Expr::Immediate(value)))
    }
}
