//! The expression tree produced by the parser and rewritten by the optimizer.
//!
//! Nodes are immutable and reference counted: a rewrite produces new nodes and shares untouched
//! subtrees with the original tree.

mod collectors;
mod visitor;

pub use collectors::collect_var_names;
pub use visitor::ExprVisitor;

use crate::registry::Operation;
use crate::utils::indent;

use core::fmt;
use std::rc::Rc;

pub type RcExpr = Rc<Expr>;

#[derive(PartialEq, Clone, Debug)]
pub enum Expr {
    /// A numeric value, either a literal or a resolved constant.
    Immediate(f64),
    /// A variable, by its lowercased name.
    Variable(String),
    /// An operator or function applied to its arguments.
    Apply(Apply),
}

#[derive(PartialEq, Clone, Debug)]
pub struct Apply {
    pub op: Operation,
    pub args: Vec<RcExpr>,
}

impl Expr {
    pub fn immediate(&self) -> Option<f64> {
        match self {
            Expr::Immediate(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this node is an immediate equal to `value`.
    pub fn is_immediate(&self, value: f64) -> bool {
        self.immediate() == Some(value)
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Immediate(v)
    }
}

impl From<Apply> for Expr {
    fn from(apply: Apply) -> Self {
        Expr::Apply(apply)
    }
}

impl Apply {
    pub fn new<O: Into<Operation>>(op: O, args: Vec<RcExpr>) -> Self {
        Self {
            op: op.into(),
            args,
        }
    }

    /// The tag used when rendering this application.
    fn tag(&self) -> &'static str {
        match &self.op {
            Operation::Function(_) => "Function",
            Operation::Operator(op) if op.position.arity() == 1 => "UnaryOperator",
            Operation::Operator(_) => "BinaryOperator",
        }
    }
}

/// Renders a tree one node per line. An application is tagged with its kind and name, and its
/// arguments follow it indented by three spaces.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Immediate(v) => write!(f, "{}", v),
            Expr::Variable(name) => f.write_str(name),
            Expr::Apply(apply) => write!(f, "{}", apply),
        }
    }
}

impl fmt::Display for Apply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.tag(), self.op.name())?;
        for arg in &self.args {
            write!(f, "\n{}", indent(arg.to_string(), 3))?;
        }
        Ok(())
    }
}
