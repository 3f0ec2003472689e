//! Symbol records held by a [`Registry`](crate::Registry).
//!
//! Operators and functions are plain capability records: a name, a description, how they are
//! applied and an evaluation function. Extending an engine is a matter of constructing one of
//! these records and registering it.

use core::fmt;
use std::rc::Rc;

/// Where an operator appears relative to its operands.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum Position {
    /// Before its single operand, like `-x`.
    Prefix,
    /// Between its two operands, like `x + y`.
    Infix,
    /// After its single operand, like `x!`.
    Postfix,
}

impl Position {
    /// Number of operands an operator in this position takes.
    pub fn arity(self) -> usize {
        match self {
            Position::Prefix | Position::Postfix => 1,
            Position::Infix => 2,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::Prefix => "prefix",
            Position::Infix => "infix",
            Position::Postfix => "postfix",
        })
    }
}

/// How repeated applications of same-priority infix operators group.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum Associativity {
    /// `a op b op c` is `(a op b) op c`.
    Left,
    /// `a op b op c` is `a op (b op c)`.
    Right,
    /// Grouping does not change the result.
    Both,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Associativity::Left => "left",
            Associativity::Right => "right",
            Associativity::Both => "both",
        })
    }
}

/// An argument outside the domain of an operation.
#[derive(PartialEq, Clone, Debug)]
pub struct DomainViolation {
    /// 1-based position of the offending argument.
    pub position: usize,
    /// Value of the offending argument.
    pub value: f64,
    /// Human-readable description of the valid domain, like `[0, +inf)`.
    pub domain: String,
}

impl DomainViolation {
    pub fn new<D: Into<String>>(position: usize, value: f64, domain: D) -> Self {
        Self {
            position,
            value,
            domain: domain.into(),
        }
    }
}

/// Evaluates an operation over already-evaluated arguments.
///
/// The argument slice always has a length the operation accepts.
pub type Evaluate = fn(&[f64]) -> Result<f64, DomainViolation>;

/// The argument counts a function accepts.
#[derive(Copy, Clone, Debug)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    /// An arbitrary predicate over the argument count.
    Predicate(fn(usize) -> bool),
}

impl Arity {
    /// Whether a call with `n` arguments is accepted.
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Arity::Exactly(m) => n == *m,
            Arity::AtLeast(m) => n >= *m,
            Arity::Predicate(pred) => pred(n),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "{}+", n),
            Arity::Predicate(_) => f.write_str("*"),
        }
    }
}

/// A named, immutable numeric value.
#[derive(Clone, Debug)]
pub struct Constant {
    pub name: String,
    pub value: f64,
}

impl Constant {
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A named placeholder whose value is bound per [`Expression`](crate::Expression).
#[derive(Clone, Debug)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// The builtin operators whose algebraic laws the optimizer knows.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum BuiltinOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Negate,
    Not,
    And,
    Or,
    Nand,
    Nor,
    Xor,
}

/// An operator record.
#[derive(Clone, Debug)]
pub struct Operator {
    pub name: String,
    pub description: String,
    /// Operator strength. The lower, the tighter the operator binds.
    pub priority: i32,
    pub position: Position,
    pub associativity: Associativity,
    pub evaluate: Evaluate,
    /// Set on the builtin operators only. User operators never carry one, whatever their name.
    pub builtin: Option<BuiltinOperator>,
}

impl Operator {
    pub fn new<N: Into<String>>(
        name: N,
        priority: i32,
        position: Position,
        associativity: Associativity,
        evaluate: Evaluate,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            priority,
            position,
            associativity,
            evaluate,
            builtin: None,
        }
    }

    pub fn describe<D: Into<String>>(mut self, description: D) -> Self {
        self.description = description.into();
        self
    }

    pub(crate) fn builtin(mut self, builtin: BuiltinOperator) -> Self {
        self.builtin = Some(builtin);
        self
    }
}

/// A function record.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: String,
    pub description: String,
    pub arity: Arity,
    pub evaluate: Evaluate,
    /// Whether equal arguments always give equal results. Impure functions are never folded.
    pub pure: bool,
}

impl Function {
    pub fn new<N: Into<String>>(name: N, arity: Arity, evaluate: Evaluate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            arity,
            evaluate,
            pure: true,
        }
    }

    pub fn describe<D: Into<String>>(mut self, description: D) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the function as returning different results for the same arguments.
    pub fn impure(mut self) -> Self {
        self.pure = false;
        self
    }
}

/// The operation applied by an [`Apply`](crate::grammar::Apply) node: a handle to a registered
/// operator or function.
///
/// Two operations are equal only if they are the same registration.
#[derive(Clone, Debug)]
pub enum Operation {
    Operator(Rc<Operator>),
    Function(Rc<Function>),
}

impl Operation {
    pub fn name(&self) -> &str {
        match self {
            Operation::Operator(op) => &op.name,
            Operation::Function(func) => &func.name,
        }
    }

    /// Applies the operation to evaluated arguments.
    pub fn evaluate(&self, args: &[f64]) -> Result<f64, DomainViolation> {
        match self {
            Operation::Operator(op) => (op.evaluate)(args),
            Operation::Function(func) => (func.evaluate)(args),
        }
    }

    /// The operator this operation refers to, if any.
    pub fn as_operator(&self) -> Option<&Rc<Operator>> {
        match self {
            Operation::Operator(op) => Some(op),
            Operation::Function(_) => None,
        }
    }

    /// The builtin operator this operation applies, if any.
    pub fn builtin(&self) -> Option<BuiltinOperator> {
        self.as_operator()?.builtin
    }

    /// Whether applying the operation to the same arguments always gives the same result.
    pub fn is_pure(&self) -> bool {
        match self {
            Operation::Operator(_) => true,
            Operation::Function(func) => func.pure,
        }
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Operation::Operator(a), Operation::Operator(b)) => Rc::ptr_eq(a, b),
            (Operation::Function(a), Operation::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Rc<Operator>> for Operation {
    fn from(op: Rc<Operator>) -> Self {
        Operation::Operator(op)
    }
}

impl From<Rc<Function>> for Operation {
    fn from(func: Rc<Function>) -> Self {
        Operation::Function(func)
    }
}
