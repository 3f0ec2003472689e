//! The symbol table consulted by the resolver and the tree builder.
//!
//! Names are matched case-insensitively. A name identifies a single kind of symbol, with two
//! exceptions: an operator name may be registered once per [`Position`] (like the prefix and infix
//! `-`), and a function name may be registered several times with different arities.

mod operation;

pub use operation::*;

use crate::builtins;
use crate::expression::Expression;
use crate::parser::{self, ParseError};
use crate::resolver::types::TokenType;
use crate::utils::fold_case;

use std::collections::HashMap;
use std::rc::Rc;

/// A mutable table of constants, variables, operators and functions, and the entry point for
/// parsing expressions over them.
#[derive(Clone, Debug)]
pub struct Registry {
    constants: HashMap<String, Rc<Constant>>,
    variables: HashMap<String, Rc<Variable>>,
    operators: HashMap<String, Vec<Rc<Operator>>>,
    functions: HashMap<String, Vec<Rc<Function>>>,
    /// Length in chars of the longest registered name.
    longest_name: usize,
}

impl Default for Registry {
    /// A registry holding all builtin constants, operators and functions.
    fn default() -> Self {
        let mut registry = Self::empty();
        builtins::register_all(&mut registry);
        registry
    }
}

fn key(name: &str) -> String {
    fold_case(name)
}

impl Registry {
    /// A registry with no symbols at all.
    pub fn empty() -> Self {
        Self {
            constants: HashMap::new(),
            variables: HashMap::new(),
            operators: HashMap::new(),
            functions: HashMap::new(),
            longest_name: 0,
        }
    }

    /// Parses `source` into an [`Expression`] over the symbols of this registry.
    pub fn parse(&self, source: &str) -> Result<Expression, ParseError> {
        parser::parse(self, source)
    }

    /// Registers a constant. Fails if its name is already used by any symbol.
    pub fn add_constant(&mut self, constant: Constant) -> bool {
        let name = key(&constant.name);
        if self.is_used(&name) {
            log::debug!("rejected constant {:?}: name in use", constant.name);
            return false;
        }
        self.note_name(&name);
        self.constants.insert(name, Rc::new(constant));
        true
    }

    /// Registers a variable. Fails if its name is already used by any symbol.
    pub fn add_variable<V: Into<Variable>>(&mut self, variable: V) -> bool {
        let variable = variable.into();
        let name = key(&variable.name);
        if self.is_used(&name) {
            log::debug!("rejected variable {:?}: name in use", variable.name);
            return false;
        }
        self.note_name(&name);
        self.variables.insert(name, Rc::new(variable));
        true
    }

    /// Registers an operator. Fails if its name belongs to a constant, variable or function, or if
    /// an operator with the same name is already registered in the same position.
    pub fn add_operator(&mut self, operator: Operator) -> bool {
        let name = key(&operator.name);
        if self.is_constant(&name) || self.is_variable(&name) || self.is_function(&name) {
            log::debug!("rejected operator {:?}: name in use", operator.name);
            return false;
        }
        if self.operator(&name, operator.position).is_some() {
            log::debug!(
                "rejected operator {:?}: {} form already registered",
                operator.name,
                operator.position
            );
            return false;
        }
        self.note_name(&name);
        self.operators
            .entry(name)
            .or_insert_with(Vec::new)
            .push(Rc::new(operator));
        true
    }

    /// Registers a function. Fails if its name belongs to a constant, variable or operator.
    /// Functions sharing a name are kept side by side.
    pub fn add_function(&mut self, function: Function) -> bool {
        let name = key(&function.name);
        if self.is_constant(&name) || self.is_variable(&name) || self.is_operator(&name) {
            log::debug!("rejected function {:?}: name in use", function.name);
            return false;
        }
        self.note_name(&name);
        self.functions
            .entry(name)
            .or_insert_with(Vec::new)
            .push(Rc::new(function));
        true
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains_key(&key(name))
    }

    pub fn is_variable(&self, name: &str) -> bool {
        self.variables.contains_key(&key(name))
    }

    pub fn is_operator(&self, name: &str) -> bool {
        self.operators.contains_key(&key(name))
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(&key(name))
    }

    fn note_name(&mut self, key: &str) {
        self.longest_name = self.longest_name.max(key.chars().count());
    }

    /// Length in chars of the longest registered name, once lowercased.
    pub(crate) fn longest_name(&self) -> usize {
        self.longest_name
    }

    /// Pushes every token type `key`, a name already in lowercase, has as a registered symbol.
    pub(crate) fn symbol_types(&self, key: &str, types: &mut Vec<TokenType>) {
        if self.constants.contains_key(key) {
            types.push(TokenType::Constant);
        }
        if let Some(operators) = self.operators.get(key) {
            types.extend(operators.iter().map(|op| TokenType::of_position(op.position)));
        }
        if self.functions.contains_key(key) {
            types.push(TokenType::Function);
        }
        if self.variables.contains_key(key) {
            types.push(TokenType::Variable);
        }
    }

    fn is_used(&self, name: &str) -> bool {
        self.is_constant(name)
            || self.is_variable(name)
            || self.is_operator(name)
            || self.is_function(name)
    }

    pub fn constant(&self, name: &str) -> Option<&Rc<Constant>> {
        self.constants.get(&key(name))
    }

    pub fn variable(&self, name: &str) -> Option<&Rc<Variable>> {
        self.variables.get(&key(name))
    }

    /// The operator registered under `name` in `position`.
    pub fn operator(&self, name: &str, position: Position) -> Option<&Rc<Operator>> {
        self.operators
            .get(&key(name))?
            .iter()
            .find(|op| op.position == position)
    }

    /// All operators registered under `name`, one per position.
    pub fn operators_named(&self, name: &str) -> &[Rc<Operator>] {
        self.operators
            .get(&key(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All functions registered under `name`, in registration order.
    pub fn functions_named(&self, name: &str) -> &[Rc<Function>] {
        self.functions
            .get(&key(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All constants, sorted by name.
    pub fn constants(&self) -> Vec<&Rc<Constant>> {
        let mut all: Vec<_> = self.constants.values().collect();
        all.sort_by(|a, b| key(&a.name).cmp(&key(&b.name)));
        all
    }

    /// All variables, sorted by name.
    pub fn variables(&self) -> Vec<&Rc<Variable>> {
        let mut all: Vec<_> = self.variables.values().collect();
        all.sort_by(|a, b| key(&a.name).cmp(&key(&b.name)));
        all
    }

    /// All operators, sorted by name, then by priority.
    pub fn operators(&self) -> Vec<&Rc<Operator>> {
        let mut all: Vec<_> = self.operators.values().flatten().collect();
        all.sort_by(|a, b| {
            key(&a.name)
                .cmp(&key(&b.name))
                .then(a.priority.cmp(&b.priority))
                .then(a.name.cmp(&b.name))
        });
        all
    }

    /// All functions, sorted by name. Overloads keep their registration order.
    pub fn functions(&self) -> Vec<&Rc<Function>> {
        let mut all: Vec<_> = self.functions.values().flatten().collect();
        all.sort_by(|a, b| key(&a.name).cmp(&key(&b.name)));
        all
    }
}
