//! An embeddable engine for arithmetic and logic expressions.
//!
//! A [`Registry`] holds the vocabulary of constants, variables, operators and functions. Parsing a
//! program against a registry yields an [`Expression`], which can be evaluated once its variables
//! are bound, or rewritten by an [`Optimizer`].
//!
//! ```
//! use libreckon::{Optimizer, Registry};
//!
//! let mut registry = Registry::default();
//! registry.add_variable("x");
//!
//! let mut expr = registry.parse("x * (2 - 1) + 0").unwrap();
//! expr.set_variable("x", 4.);
//! assert_eq!(expr.evaluate(), Ok(4.));
//!
//! let optimized = Optimizer::new().optimize(&expr);
//! assert_eq!(optimized.to_string(), "x");
//! ```

#[macro_use]
mod diagnostics;
pub use diagnostics::{AssociatedDiagnostic, Diagnostic, DiagnosticKind};

pub mod common;
pub use common::Span;

pub mod registry;
pub use registry::{
    Arity, Associativity, BuiltinOperator, Constant, DomainViolation, Function, Operation,
    Operator, Position, Registry, Variable,
};

mod builtins;

pub mod resolver;
pub use resolver::resolve;
pub use resolver::types::{Token, TokenType};

pub mod grammar;
pub use grammar::{Expr, RcExpr};

mod parser;
pub use parser::ParseError;

pub mod expression;
pub use expression::{EvaluationError, Expression};

pub mod optimizer;
pub use optimizer::{BinarySimplification, ConstantFolding, Optimizer, Pass, PassName};

mod math;

#[cfg(feature = "benchmark-internals")]
pub use math::{_binary_gcd, _euclidean_gcd};

mod utils;
