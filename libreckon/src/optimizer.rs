//! Bottom-up rewriting of expression trees.
//!
//! A [`Pass`] is a local rewrite: shown one node whose arguments have already been rewritten, it
//! either returns a replacement or declines. The [`Optimizer`] drives a list of passes over a tree
//! until none of them changes anything.
//!
//! Two passes ship with libreckon, named by [`PassName`]:
//!
//! - `BinaryOperatorSimplifying` applies identity and annihilator laws of the arithmetic and
//!   logical infix operators, like `x*1 -> x` and `x and 0 -> 0`.
//! - `ConstantFolding` replaces an operation over literal values with its result.

mod binary_simplification;
mod constant_folding;

pub use binary_simplification::BinarySimplification;
pub use constant_folding::ConstantFolding;

use crate::expression::Expression;
use crate::grammar::{Apply, Expr, RcExpr};

use core::fmt;
use std::rc::Rc;

/// A local rewrite rule over expression nodes.
///
/// Passes run bottom-up, so the arguments of a node given to [`run`](Pass::run) have already been
/// rewritten. A pass must decline (return `None`) on any node it would not change; in particular
/// it must decline on its own output, or optimization never reaches a fixed point.
pub trait Pass {
    /// Name of the pass, for logging.
    fn name(&self) -> &str;

    /// Rewrites `node`, or returns `None` to leave it as is.
    fn run(&self, node: &RcExpr) -> Option<RcExpr>;
}

macro_rules! define_passes {
    ($($kind:ident: $ctor:expr)*) => {
        /// Names of the builtin passes, in the order an optimizer runs them.
        #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
        pub enum PassName {
            $($kind,)*
        }

        impl PassName {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(PassName::$kind => stringify!($kind),)*
                }
            }
        }

        fn builtin_passes() -> Vec<(Option<PassName>, Box<dyn Pass>)> {
            vec![$((Some(PassName::$kind), Box::new(($ctor)()) as Box<dyn Pass>),)*]
        }
    };
}

define_passes! {
    BinaryOperatorSimplifying: BinarySimplification::default
              ConstantFolding: || ConstantFolding
}

impl fmt::Display for PassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of passes.
pub struct Optimizer {
    passes: Vec<(Option<PassName>, Box<dyn Pass>)>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer {
    /// An optimizer running the builtin passes.
    pub fn new() -> Self {
        Self {
            passes: builtin_passes(),
        }
    }

    /// An optimizer with no passes.
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// Appends a custom pass, run after all passes already added.
    pub fn add_pass<P: Pass + 'static>(&mut self, pass: P) {
        self.passes.push((None, Box::new(pass)));
    }

    /// Removes a builtin pass.
    pub fn remove(&mut self, name: PassName) {
        self.passes.retain(|(n, _)| *n != Some(name));
    }

    /// Names of the passes, in running order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|(_, pass)| pass.name()).collect()
    }

    /// Runs `pass` once over `expr`. The result has no variables bound.
    pub fn apply(&self, expr: &Expression, pass: &dyn Pass) -> Expression {
        let root = rewrite(expr.root(), pass).unwrap_or_else(|| Rc::clone(expr.root()));
        Expression::new(root)
    }

    /// Runs every pass over `expr`, in order, until a full sweep changes nothing. The result has
    /// no variables bound.
    pub fn optimize(&self, expr: &Expression) -> Expression {
        let mut root = Rc::clone(expr.root());
        let mut sweeps = 0;
        loop {
            sweeps += 1;
            let mut changed = false;
            for (_, pass) in &self.passes {
                if let Some(rewritten) = rewrite(&root, pass.as_ref()) {
                    log::trace!("{} rewrote the tree in sweep {}", pass.name(), sweeps);
                    root = rewritten;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        log::debug!("optimized in {} sweeps", sweeps);
        Expression::new(root)
    }
}

/// Runs `pass` over the tree under `node`, bottom-up. Returns `None` if nothing changed.
fn rewrite(node: &RcExpr, pass: &dyn Pass) -> Option<RcExpr> {
    let apply = match node.as_ref() {
        Expr::Apply(apply) => apply,
        Expr::Immediate(_) | Expr::Variable(_) => return pass.run(node),
    };

    let mut changed = false;
    let args: Vec<RcExpr> = apply
        .args
        .iter()
        .map(|arg| match rewrite(arg, pass) {
            Some(arg) => {
                changed = true;
                arg
            }
            None => Rc::clone(arg),
        })
        .collect();

    if !changed {
        return pass.run(node);
    }
    let rebuilt: RcExpr = Rc::new(Apply::new(apply.op.clone(), args).into());
    Some(pass.run(&rebuilt).unwrap_or(rebuilt))
}
