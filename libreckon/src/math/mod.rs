//! Integer algorithms backing the builtin number-theory functions.
//!
//! These work on machine integers rather than on expression values; the builtins check that their
//! arguments are whole numbers before converting.

mod gcd;
pub use gcd::*;
