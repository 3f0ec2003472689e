use libreckon::{Arity, Function, Optimizer, ParseError, Registry, Span, TokenType};

use std::time::{Duration, Instant};

fn registry() -> Registry {
    let mut registry = Registry::default();
    registry.add_variable("x");
    registry.add_variable("y");
    registry
}

fn close(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= 1e-9 * a.abs().max(1.) || (a.is_nan() && b.is_nan())
}

macro_rules! evaluates_to {
    ($($name:ident: $program:expr => $result:expr)*) => {
    $(
        #[test]
        fn $name() {
            let result = registry().parse($program).unwrap().evaluate().unwrap();
            assert!(close(result, $result), "{} evaluated to {}", $program, result);
        }
    )*
    }
}

macro_rules! optimizes_to {
    ($($name:ident: $program:expr => $optimized:expr)*) => {
    $(
        #[test]
        fn $name() {
            let registry = registry();
            let expr = registry.parse($program).unwrap();
            let optimized = Optimizer::new().optimize(&expr);
            let expected = registry.parse($optimized).unwrap();
            pretty_assertions::assert_eq!(optimized.to_string(), expected.to_string());
        }
    )*
    }
}

evaluates_to! {
    right_assoc_power:  "2^3^2" => 512.
    product_first:      "2+2*2" => 6.
    parenthesized:      "(2+2)*2" => 8.
    double_negation:    "--1" => 1.
    quad_negation:      "----1" => 1.
    padded:             "  2 + 3  " => 5.
}

optimizes_to! {
    folds_sum:          "2+3" => "5"
    add_zero:           "x+0" => "x"
    mul_zero:           "x*0" => "0"
    pow_zero:           "x^0" => "1"
    and_false:          "x and false" => "0"
    or_false:           "x or false" => "to_logical(x)"
    folds_then_drops:   "x * (2 - 1) + 0 * y" => "x"
}

#[test]
fn folded_sum_is_a_single_literal() {
    let registry = registry();
    let expr = registry.parse("2+3").unwrap();
    assert_eq!(Optimizer::new().optimize(&expr).to_string(), "5");
}

#[test]
fn rejects_imbalanced_parentheses() {
    let registry = registry();
    for program in &["(1 + 2", "1 + 2)", ")1 + 2(", "((x)", "sqrt(4))"] {
        assert!(
            matches!(
                registry.parse(program),
                Err(ParseError::ImbalancedParentheses { .. })
            ),
            "{} was not rejected",
            program
        );
    }
}

#[test]
fn imbalance_points_at_parenthesis() {
    assert_eq!(
        registry().parse("1 + (2"),
        Err(ParseError::ImbalancedParentheses { span: Span::at(4) })
    );
}

#[test]
fn resolution_is_deterministic() {
    let registry = registry();
    for program in &["2 + x * sin(y)", "not x or y => x <=> 1", "-2^3!%---2", "log(2, 8) mod 3"] {
        let first = libreckon::resolve(&registry, program).unwrap();
        let second = libreckon::resolve(&registry, program).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn overlapping_overloads_are_ambiguous() {
    let mut registry = Registry::default();
    assert!(registry.add_function(Function::new("f", Arity::AtLeast(1), |a| Ok(a[0]))));
    assert!(registry.add_function(Function::new("f", Arity::Exactly(2), |a| Ok(a[1]))));

    assert!(registry.parse("f(1)").is_ok());
    assert!(matches!(
        registry.parse("f(1, 2)"),
        Err(ParseError::AmbiguousFunction { arity: 2, .. })
    ));
}

#[test]
fn long_sums_resolve_quickly() {
    let registry = registry();
    let program = vec!["1"; 2_000].join("+");
    let start = Instant::now();
    let tokens = libreckon::resolve(&registry, &program).unwrap();
    let elapsed = start.elapsed();
    assert_eq!(tokens.len(), 3_999);
    assert!(
        elapsed < Duration::from_secs(5),
        "resolving {} chars took {:?}",
        program.len(),
        elapsed
    );
}

#[test]
fn long_prefix_chains_resolve() {
    let program = format!("{}x", "not ".repeat(5_000) + &"-".repeat(5_000));
    let tokens = libreckon::resolve(&registry(), &program).unwrap();
    assert_eq!(tokens.len(), 10_001);
    assert!(tokens[..10_000].iter().all(|t| t.ty == TokenType::Prefix));

    let mut expr = registry().parse(&format!("{}x", "-".repeat(500))).unwrap();
    expr.set_variable("x", 2.);
    assert_eq!(expr.evaluate(), Ok(2.));
}

#[test]
fn optimizing_ignores_registry_identity() {
    let expr = registry().parse("x * 1 + 0 * y").unwrap();
    let optimized = Optimizer::new().optimize(&expr);
    assert_eq!(optimized.to_string(), registry().parse("x").unwrap().to_string());
}

#[test]
fn random_draws_are_never_folded() {
    let registry = registry();
    let optimized = Optimizer::new().optimize(&registry.parse("rand(1, 2) + 0 * 3").unwrap());
    assert_eq!(optimized.to_string(), registry.parse("rand(1, 2)").unwrap().to_string());
    let first = optimized.evaluate().unwrap();
    assert!((1. ..2.).contains(&first));
}

#[test]
fn sqrt_of_negative_is_outside_domain() {
    let err = registry().parse("sqrt(-1)").unwrap().evaluate().unwrap_err();
    assert_eq!(err.to_string(), "'sqrt': argument 1 = -1 must be in [0, +inf)");
}

const PROGRAMS: &[&str] = &[
    "x + 0",
    "0 - x",
    "x * (2 - 1) + 0 * y",
    "2 * x ^ 1 / 1",
    "(x + y) * (x - y)",
    "x and true or y and false",
    "x nand true xor false",
    "not (x nor false)",
    "max(x, 2 * 3, y) + sqrt(16)",
    "x ^ 0 + 1 ^ y",
    "1 ^ x - x mod 3",
    "(x > y) => (y <= x)",
    "lagrange(x, 0, 0, 1, 1, 2, 4)",
    "poly(x, 1, 0 * y, 3)",
    "2 + 2 * sin(x * 2^5)",
];

const BINDINGS: &[(f64, f64)] = &[(0., 0.), (1., 0.), (0., 1.), (2.5, -3.), (-7., 0.5), (10., 10.)];

#[test]
fn optimizing_preserves_values() {
    let registry = registry();
    let optimizer = Optimizer::new();
    for program in PROGRAMS {
        let mut expr = registry.parse(program).unwrap();
        let mut optimized = optimizer.optimize(&expr);
        for &(x, y) in BINDINGS {
            expr.set_variables(vec![("x", x), ("y", y)]);
            optimized.set_variables(vec![("x", x), ("y", y)]);
            if let Ok(expected) = expr.evaluate() {
                let actual = optimized.evaluate().unwrap();
                assert!(
                    close(actual, expected),
                    "{} at x = {}, y = {}: optimized to {} but expected {}",
                    program,
                    x,
                    y,
                    actual,
                    expected
                );
            }
        }
    }
}

#[test]
fn optimizing_is_idempotent() {
    let registry = registry();
    let optimizer = Optimizer::new();
    for program in PROGRAMS {
        let once = optimizer.optimize(&registry.parse(program).unwrap());
        let twice = optimizer.optimize(&once);
        assert_eq!(once.to_string(), twice.to_string(), "{}", program);
    }
}
