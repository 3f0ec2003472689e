//! Splits an expression into typed tokens.
//!
//! Reckon has no fixed lexical syntax: whether `e` is a constant or the start of `exp`, or whether
//! `-` negates or subtracts, depends on what the [`Registry`] holds and on what surrounds it. The
//! resolver therefore searches for the one way of chopping the source into registered symbols,
//! numbers, parentheses and commas that the token grammar (see [`bigrams`]) accepts.
//!
//! The search runs over `(position, predecessor type)` states. From a state, every candidate
//! substring starting at `position` and not crossing whitespace is tried under every token type it
//! could have. A state whose continuations succeed in more than one way is ambiguous, and so is
//! any state reaching an ambiguous one. Since a state only depends on states further right, the
//! table of outcomes is filled from the end of the input back to its start.

pub mod bigrams;
pub mod types;

use crate::common::Span;
use crate::parser::ParseError;
use crate::registry::Registry;
use types::*;

use std::collections::HashMap;

/// Resolves `source` into the unique token sequence the grammar accepts.
///
/// The source is matched case-insensitively. Whitespace separates tokens and is otherwise
/// discarded.
pub fn resolve(registry: &Registry, source: &str) -> Result<Vec<Token>, ParseError> {
    let mut resolver = Resolver::new(registry, source);
    resolver.fill();
    match resolver.outcome(0, TokenType::Begin) {
        Outcome::Unresolved => Err(ParseError::Unresolved),
        Outcome::Ambiguous => Err(ParseError::Ambiguous),
        Outcome::Resolved { .. } => Ok(resolver.replay()),
    }
}

/// Token types that can stand before another token.
const PREDECESSORS: &[TokenType] = &[
    TokenType::Begin,
    TokenType::Immediate,
    TokenType::Constant,
    TokenType::Variable,
    TokenType::Prefix,
    TokenType::Infix,
    TokenType::Postfix,
    TokenType::Function,
    TokenType::ParenLeft,
    TokenType::ParenRight,
    TokenType::Comma,
];

/// The result of resolving the rest of an expression from some state.
#[derive(PartialEq, Copy, Clone, Debug)]
enum Outcome {
    /// Exactly one continuation exists, starting with a token of type `ty` covering
    /// `start..end`.
    Resolved {
        ty: TokenType,
        start: usize,
        end: usize,
    },
    Unresolved,
    Ambiguous,
}

/// Tracks whether a growing candidate is, or could still become, a numeral.
#[derive(Default)]
struct Numeral {
    digits: usize,
    points: usize,
    other: bool,
}

impl Numeral {
    fn push(&mut self, c: char) {
        match c {
            '0'..='9' => self.digits += 1,
            '.' => self.points += 1,
            _ => self.other = true,
        }
    }

    fn viable(&self) -> bool {
        !self.other && self.points <= 1
    }

    /// Digits with at most one decimal point.
    fn complete(&self) -> bool {
        self.viable() && self.digits > 0
    }
}

struct Resolver<'a> {
    registry: &'a Registry,
    /// The lowercased source.
    input: Vec<char>,
    /// For each char of `input`, the index of the source char it was lowercased from.
    origin: Vec<usize>,
    /// For each position, the first position at or after it that is not whitespace.
    next_token: Vec<usize>,
    /// Outcomes of states whose position starts a token or ends the input.
    memo: HashMap<(usize, TokenType), Outcome>,
}

impl<'a> Resolver<'a> {
    fn new(registry: &'a Registry, source: &str) -> Self {
        let mut input = Vec::with_capacity(source.len());
        let mut origin = Vec::with_capacity(source.len());
        for (index, c) in source.chars().enumerate() {
            for lower in c.to_lowercase() {
                input.push(lower);
                origin.push(index);
            }
        }

        Self {
            registry,
            input,
            origin,
            next_token: Vec::new(),
            memo: HashMap::new(),
        }
    }

    fn fill(&mut self) {
        let len = self.input.len();
        self.next_token = vec![len; len + 1];

        for position in (0..=len).rev() {
            if position < len && self.input[position].is_whitespace() {
                self.next_token[position] = self.next_token[position + 1];
                continue;
            }
            self.next_token[position] = position;

            let continuations = self.continuations(position);
            for &predecessor in PREDECESSORS {
                let outcome = if position == len {
                    if bigrams::may_follow(predecessor, TokenType::End) {
                        Outcome::Resolved {
                            ty: TokenType::End,
                            start: len,
                            end: len,
                        }
                    } else {
                        Outcome::Unresolved
                    }
                } else {
                    choose(predecessor, position, &continuations)
                };
                self.memo.insert((position, predecessor), outcome);
            }
            log::trace!("resolved position {}: {} continuations", position, continuations.len());
        }
    }

    /// The outcome of the state at `position`, skipping any whitespace there.
    fn outcome(&self, position: usize, predecessor: TokenType) -> Outcome {
        let start = self.next_token[position];
        self.memo
            .get(&(start, predecessor))
            .copied()
            .unwrap_or(Outcome::Unresolved)
    }

    /// Every token that can start at `start`, with the outcome of resolving what follows it.
    fn continuations(&self, start: usize) -> Vec<(TokenType, usize, Outcome)> {
        let mut continuations = Vec::new();
        let mut candidate = String::new();
        let mut numeral = Numeral::default();
        let mut types = Vec::with_capacity(2);
        let longest = self.registry.longest_name().max(1);

        for end in start + 1..=self.input.len() {
            let c = self.input[end - 1];
            if c.is_whitespace() {
                break;
            }
            candidate.push(c);
            numeral.push(c);
            let named = end - start <= longest;
            if !named && !numeral.viable() {
                break;
            }

            types.clear();
            if numeral.complete() {
                types.push(TokenType::Immediate);
            }
            if named {
                self.token_types(&candidate, &mut types);
            }
            for &ty in &types {
                continuations.push((ty, end, self.outcome(end, ty)));
            }
        }

        continuations
    }

    /// Pushes every token type `candidate` could have as a symbol or punctuation.
    fn token_types(&self, candidate: &str, types: &mut Vec<TokenType>) {
        self.registry.symbol_types(candidate, types);
        match candidate {
            "(" => types.push(TokenType::ParenLeft),
            ")" => types.push(TokenType::ParenRight),
            "," => types.push(TokenType::Comma),
            _ => {}
        }
    }

    /// Walks the winning path through the memo table.
    fn replay(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut state = (0, TokenType::Begin);

        while let Outcome::Resolved { ty, start, end } = self.outcome(state.0, state.1) {
            if ty == TokenType::End {
                break;
            }
            let text: String = self.input[start..end].iter().collect();
            let span = Span::from(self.origin[start]..self.origin[end - 1] + 1);
            tokens.push(Token::new(text, ty, span));
            state = (end, ty);
        }

        tokens
    }
}

/// Picks the one continuation allowed after `predecessor`, if there is exactly one.
fn choose(
    predecessor: TokenType,
    start: usize,
    continuations: &[(TokenType, usize, Outcome)],
) -> Outcome {
    let mut outcome = Outcome::Unresolved;
    for &(ty, end, next) in continuations {
        if !bigrams::may_follow(predecessor, ty) {
            continue;
        }
        match next {
            Outcome::Unresolved => {}
            Outcome::Ambiguous => return Outcome::Ambiguous,
            Outcome::Resolved { .. } => {
                if outcome != Outcome::Unresolved {
                    return Outcome::Ambiguous;
                }
                outcome = Outcome::Resolved { ty, start, end };
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Arity, Constant, DomainViolation, Function};

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry.add_variable("x");
        registry.add_variable("y");
        registry
    }

    fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| format!("{}:{:?}", t.text, t.ty))
            .collect::<Vec<_>>()
            .join(" ")
    }

    macro_rules! resolver_tests {
        ($($name:ident: $program:expr => $tokens:expr)*) => {
        $(
            #[test]
            fn $name() {
                let tokens = resolve(&registry(), $program).unwrap();
                assert_eq!(render(&tokens), $tokens);
            }
        )*
        }
    }

    macro_rules! resolver_error_tests {
        ($($name:ident: $program:expr => $err:expr)*) => {
        $(
            #[test]
            fn $name() {
                assert_eq!(resolve(&registry(), $program).unwrap_err(), $err);
            }
        )*
        }
    }

    resolver_tests! {
        integer:            "12" => "12:Immediate"
        decimal:            "1.25" => "1.25:Immediate"
        leading_point:      ".5" => ".5:Immediate"
        infix:              "1+2" => "1:Immediate +:Infix 2:Immediate"
        prefix_minus:       "-x" => "-:Prefix x:Variable"
        infix_minus:        "x-1" => "x:Variable -:Infix 1:Immediate"
        prefix_chain:       "--1" => "-:Prefix -:Prefix 1:Immediate"
        postfix:            "3!" => "3:Immediate !:Postfix"
        constant:           "pi*2" => "pi:Constant *:Infix 2:Immediate"
        case_insensitive:   "PI" => "pi:Constant"
        function_call:      "max(x,2)" => "max:Function (:ParenLeft x:Variable ,:Comma 2:Immediate ):ParenRight"
        empty_call:         "max()" => "max:Function (:ParenLeft ):ParenRight"
        word_operator:      "x mod y" => "x:Variable mod:Infix y:Variable"
        spaces:             "  1 +  2 " => "1:Immediate +:Infix 2:Immediate"
        longest_only_valid: "x<=y" => "x:Variable <=:Infix y:Variable"
        exp_not_e:          "exp(1)" => "exp:Function (:ParenLeft 1:Immediate ):ParenRight"
    }

    resolver_error_tests! {
        unknown_symbol:     "x + z" => ParseError::Unresolved
        dangling_infix:     "1 +" => ParseError::Unresolved
        adjacent_values:    "1 2" => ParseError::Unresolved
        two_points:         "1.2.3" => ParseError::Unresolved
        negative_literal:   "1 + -" => ParseError::Unresolved
        bare_function:      "sqrt" => ParseError::Unresolved
    }

    #[test]
    fn spans_point_into_source() {
        let tokens = resolve(&registry(), " 10 + x").unwrap();
        let spans: Vec<_> = tokens.iter().map(|t| (t.span.lo, t.span.hi)).collect();
        assert_eq!(spans, vec![(1, 3), (4, 5), (6, 7)]);
    }

    #[test]
    fn overlapping_names_are_ambiguous() {
        use crate::registry::{Associativity, Operator, Position};

        fn add(args: &[f64]) -> Result<f64, DomainViolation> {
            Ok(args[0] + args[1])
        }
        let mut registry = Registry::empty();
        registry.add_constant(Constant::new("a", 1.));
        registry.add_constant(Constant::new("aa", 2.));
        registry.add_operator(Operator::new("+", 1, Position::Infix, Associativity::Both, add));
        registry.add_operator(Operator::new("+a", 1, Position::Infix, Associativity::Both, add));

        // a + aa, or a +a a
        assert_eq!(resolve(&registry, "a+aa"), Err(ParseError::Ambiguous));
        assert!(resolve(&registry, "a + aa").is_ok());
    }

    #[test]
    fn function_and_variable_prefixes() {
        let mut registry = registry();
        fn id(args: &[f64]) -> Result<f64, DomainViolation> {
            Ok(args[0])
        }
        registry.add_function(Function::new("xy", Arity::Exactly(1), id));
        let tokens = resolve(&registry, "xy(x)").unwrap();
        assert_eq!(render(&tokens), "xy:Function (:ParenLeft x:Variable ):ParenRight");
    }

    #[test]
    fn deterministic() {
        let registry = registry();
        let program = "2 + 2 * sin(x * 2^5) - not y!";
        assert_eq!(resolve(&registry, program), resolve(&registry, program));
    }

    fn is_numeral(s: &str) -> bool {
        let mut numeral = Numeral::default();
        s.chars().for_each(|c| numeral.push(c));
        numeral.complete()
    }

    #[test]
    fn numerals() {
        assert!(is_numeral("0"));
        assert!(is_numeral("10."));
        assert!(!is_numeral("."));
        assert!(!is_numeral("-1"));
        assert!(!is_numeral("1e5"));
        assert!(!is_numeral("1.2.3"));
    }

    #[test]
    fn spans_survive_lowercasing() {
        let mut registry = registry();
        // 'İ' lowercases to two chars.
        registry.add_constant(Constant::new("İ", 1.));
        let tokens = resolve(&registry, "İ + x").unwrap();
        let spans: Vec<_> = tokens.iter().map(|t| (t.span.lo, t.span.hi)).collect();
        assert_eq!(spans, vec![(0, 1), (2, 3), (4, 5)]);
        assert_eq!(tokens[0].ty, TokenType::Constant);
    }

    #[test]
    fn numerals_outgrow_names() {
        let program = "3.14159265358979 + 123456789012345678";
        let tokens = resolve(&registry(), program).unwrap();
        assert_eq!(
            render(&tokens),
            "3.14159265358979:Immediate +:Infix 123456789012345678:Immediate"
        );
    }

    #[test]
    fn long_prefix_chain() {
        let program = format!("{}1", "-".repeat(20_000));
        let tokens = resolve(&registry(), &program).unwrap();
        assert_eq!(tokens.len(), 20_001);
        assert_eq!(tokens[19_999].ty, TokenType::Prefix);
        assert_eq!(tokens[20_000].ty, TokenType::Immediate);
    }
}
