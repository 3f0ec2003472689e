use num_traits::{PrimInt, Unsigned};

/// Calculates the GCD for (u, v) ∈ (N, N). `gcd(0, v)` is `v`.
///
/// Currently, a Euclidean method is used as an underlying implementation.
///
/// ```text
/// binary_gcd              time:   [2.4969 ns 2.5894 ns 2.6641 ns]
///
/// euclidean_gcd           time:   [2.8543 ns 2.8948 ns 2.9257 ns]
/// ```
pub fn gcd<N: Unsigned + PrimInt>(u: N, v: N) -> N {
    euclidean_gcd(u, v)
}

/// Calculates the LCM for (u, v) ∈ (N, N), or `None` if it overflows `N`. `lcm(0, v)` is `0`.
pub fn lcm<N: Unsigned + PrimInt>(u: N, v: N) -> Option<N> {
    if u.is_zero() || v.is_zero() {
        return Some(N::zero());
    }
    (u / gcd(u, v)).checked_mul(&v)
}

/// The [Binary GCD] algorithm, or Stein's algorithm.
///
/// [Binary GCD]: https://en.wikipedia.org/wiki/Binary_GCD_algorithm
#[allow(unused)]
fn binary_gcd<N: Unsigned + PrimInt>(mut u: N, mut v: N) -> N {
    if u.is_zero() {
        return v;
    }
    if v.is_zero() {
        return u;
    }

    let shift_back = (u | v).trailing_zeros() as usize;
    u = u >> u.trailing_zeros() as usize;
    v = v >> v.trailing_zeros() as usize;
    if u > v {
        std::mem::swap(&mut u, &mut v);
    }
    v = v - u;
    while !v.is_zero() {
        v = v >> v.trailing_zeros() as usize;
        if u > v {
            std::mem::swap(&mut u, &mut v);
        }
        v = v - u;
    }
    u << shift_back
}

#[cfg(feature = "benchmark-internals")]
pub fn _binary_gcd<N: Unsigned + PrimInt>(u: N, v: N) -> N {
    binary_gcd(u, v)
}

/// The [Euclidean GCD] algorithm.
///
/// [Euclidean GCD]: https://en.wikipedia.org/wiki/Euclidean_algorithm
fn euclidean_gcd<N: Unsigned + PrimInt>(mut u: N, mut v: N) -> N {
    while !v.is_zero() {
        let t = v;
        v = u % v;
        u = t;
    }
    u
}

#[cfg(feature = "benchmark-internals")]
pub fn _euclidean_gcd<N: Unsigned + PrimInt>(u: N, v: N) -> N {
    euclidean_gcd(u, v)
}
