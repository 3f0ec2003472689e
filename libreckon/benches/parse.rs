#[macro_use]
extern crate criterion;
extern crate libreckon;

use criterion::{black_box, Criterion};
use libreckon::Registry;

const PROGRAMS: [(&str, &str); 4] = [
    ("arithmetic", "2 + 2 * 2 - 8 / 4 ^ 0.5"),
    ("unary_chain", "-2^3!%---2"),
    ("logic", "not x or y and true => x <=> y xor false"),
    ("calls", "max(sqrt(x), log(2, y), lagrange(x, 0, 0, 1, 1, 2, 4)) + poly(y, 1, 2, 3)"),
];

fn registry() -> Registry {
    let mut registry = Registry::default();
    registry.add_variable("x");
    registry.add_variable("y");
    registry
}

fn bench_parse(c: &mut Criterion) {
    let registry = registry();
    for (name, program) in PROGRAMS.iter() {
        c.bench_function(&format!("parse_{}", name), |b| {
            b.iter(|| registry.parse(black_box(program)))
        });
    }
}

fn bench_default_registry(c: &mut Criterion) {
    c.bench_function("default_registry", |b| b.iter(Registry::default));
}

criterion_group!(parse_benches, bench_parse, bench_default_registry);
criterion_main!(parse_benches);
