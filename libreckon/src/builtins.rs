//! The builtin catalog registered by [`Registry::default`].
//!
//! Values double as truth values: anything of at least 1 is true, anything else false, and logical
//! operations produce 1 or 0.

mod functions;
mod operators;

pub(crate) use functions::to_logical;
pub(crate) use operators::{logical_not, negation};

use crate::registry::{Constant, DomainViolation, Registry};
use crate::utils::is_integral;

/// Registers every builtin constant, operator and function into `registry`.
pub(crate) fn register_all(registry: &mut Registry) {
    for constant in constants() {
        registry.add_constant(constant);
    }
    for operator in operators::operators() {
        registry.add_operator(operator);
    }
    for function in functions::functions() {
        registry.add_function(function);
    }
}

fn constants() -> Vec<Constant> {
    vec![
        Constant::new("false", 0.),
        Constant::new("true", 1.),
        Constant::new("e", std::f64::consts::E),
        Constant::new("pi", std::f64::consts::PI),
        Constant::new("inf", f64::MAX),
    ]
}

const NATURALS: &str = "{0, 1, 2, ...}";

fn truth(x: f64) -> bool {
    x >= 1.
}

fn logical(b: bool) -> f64 {
    if b {
        1.
    } else {
        0.
    }
}

/// Checks that the argument at `position` is a whole number of at least `min`.
fn whole(position: usize, x: f64, min: f64, domain: &str) -> Result<f64, DomainViolation> {
    if is_integral(x) && x >= min {
        Ok(x)
    } else {
        Err(DomainViolation::new(position, x, domain))
    }
}

fn factorial(n: f64) -> Result<f64, DomainViolation> {
    let n = whole(1, n, 0., NATURALS)?;
    // 171! no longer fits an f64
    if n > 170. {
        return Ok(f64::INFINITY);
    }
    Ok((2..=n as u32).fold(1., |acc, i| acc * f64::from(i)))
}

fn power(x: f64, y: f64) -> Result<f64, DomainViolation> {
    if x < 0. && y != 0. && y.abs() < 1. {
        return Err(DomainViolation::new(1, x, "[0; +inf) for |y| < 1"));
    }
    Ok(x.powf(y))
}
