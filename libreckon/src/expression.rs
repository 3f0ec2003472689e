//! A parsed expression and its variable bindings.

pub(crate) mod errors;

pub use errors::EvaluationError;

use crate::grammar::{collect_var_names, Apply, ExprVisitor, RcExpr};
use crate::utils::fold_case;

use core::fmt;
use std::collections::{BTreeSet, HashMap};

/// An expression tree together with the values bound to its variables.
///
/// The tree is immutable. Bindings can be changed freely between evaluations, and evaluating
/// never consumes them.
#[derive(PartialEq, Clone, Debug)]
pub struct Expression {
    root: RcExpr,
    bindings: HashMap<String, f64>,
}

impl Expression {
    /// Wraps a tree, with no variables bound.
    pub fn new(root: RcExpr) -> Self {
        Self {
            root,
            bindings: HashMap::new(),
        }
    }

    pub fn root(&self) -> &RcExpr {
        &self.root
    }

    /// Binds `value` to the variable `name`, replacing any previous binding. Names are
    /// case-insensitive.
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.bindings.insert(fold_case(name), value);
    }

    /// Binds several variables at once.
    pub fn set_variables<I, K>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        for (name, value) in bindings {
            self.set_variable(name.as_ref(), value);
        }
    }

    /// The value bound to `name`, if any.
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.bindings.get(&fold_case(name)).copied()
    }

    /// Names of the variables the expression uses, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        collect_var_names(&self.root)
    }

    /// Evaluates the expression under the current bindings.
    ///
    /// Every argument of every operation is evaluated, left to right, before the operation
    /// itself.
    pub fn evaluate(&self) -> Result<f64, EvaluationError> {
        Evaluator {
            bindings: &self.bindings,
        }
        .visit_expr(&self.root)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

struct Evaluator<'b> {
    bindings: &'b HashMap<String, f64>,
}

impl<'a, 'b> ExprVisitor<'a> for Evaluator<'b> {
    type Output = Result<f64, EvaluationError>;

    fn visit_immediate(&mut self, value: f64) -> Self::Output {
        Ok(value)
    }

    fn visit_var(&mut self, name: &'a str) -> Self::Output {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| EvaluationError::MissingVariable {
                name: name.to_owned(),
            })
    }

    fn visit_apply(&mut self, apply: &'a Apply) -> Self::Output {
        let args = apply
            .args
            .iter()
            .map(|arg| self.visit_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;
        apply
            .op
            .evaluate(&args)
            .map_err(|violation| EvaluationError::OutsideDomain {
                operation: apply.op.name().to_owned(),
                position: violation.position,
                value: violation.value,
                domain: violation.domain,
            })
    }
}
