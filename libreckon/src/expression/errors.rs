//! Errors produced while evaluating an expression.

use crate::common::Span;
use crate::diagnostics::{Diagnostic, DiagnosticRecord};

use core::fmt;

/// Why an expression could not be evaluated.
#[derive(PartialEq, Clone, Debug)]
pub enum EvaluationError {
    /// The expression uses a variable with no bound value.
    MissingVariable { name: String },
    /// An operation received an argument outside its domain.
    OutsideDomain {
        /// Name of the operation.
        operation: String,
        /// 1-based position of the offending argument.
        position: usize,
        value: f64,
        /// Description of the valid domain.
        domain: String,
    },
}

impl EvaluationError {
    /// The diagnostic code of this error.
    pub fn code(&self) -> &'static str {
        match self {
            EvaluationError::MissingVariable { .. } => MissingVariable::CODE,
            EvaluationError::OutsideDomain { .. } => OutsideDomain::CODE,
        }
    }

    /// Converts the error into a diagnostic over the `source` of the evaluated expression.
    pub fn diagnostic(&self, source: &str) -> Diagnostic {
        let whole = Span::new(0, source.chars().count());
        let diag = Diagnostic::span_err(whole, self.to_string(), self.code(), None::<String>);
        match self {
            EvaluationError::MissingVariable { name } => {
                diag.with_help(format!("bind a value to `{}` before evaluating", name))
            }
            EvaluationError::OutsideDomain { domain, .. } => {
                diag.with_note(format!("valid arguments lie in {}", domain))
            }
        }
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::MissingVariable { name } => {
                write!(f, "Variable '{}' has no value", name)
            }
            EvaluationError::OutsideDomain {
                operation,
                position,
                value,
                domain,
            } => write!(
                f,
                "'{}': argument {} = {} must be in {}",
                operation, position, value, domain
            ),
        }
    }
}

impl std::error::Error for EvaluationError {}

define_errors! {
    EvaluationErrors;

    ///This error fires when an expression is evaluated while one of its variables has no value.
    ///
    ///Registering a variable only makes its name known to the parser. Every expression keeps its
    ///own bindings, and a value must be bound to each variable the expression uses before it is
    ///evaluated. For example, with `x` registered,
    ///
    ///```text
    ///x + 1
    ///```
    ///
    ///parses, but evaluates only once `x` is bound.
    E0001: MissingVariable

    ///This error fires when an operator or function receives an argument it is not defined for.
    ///
    ///The error names the operation, the position of the offending argument, its value and the
    ///set of values the argument may take. For example
    ///
    ///```text
    ///sqrt(-1)
    ///```
    ///
    ///fails with `'sqrt': argument 1 = -1 must be in [0, +inf)`.
    ///
    ///Not every undefined result is an error. Operations like `/` and `tan` let infinities and NaN
    ///through where floating-point arithmetic defines them.
    E0002: OutsideDomain
}
