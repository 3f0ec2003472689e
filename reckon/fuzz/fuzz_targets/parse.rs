#![no_main]
use libfuzzer_sys::fuzz_target;

use libreckon::{Optimizer, Registry};

fuzz_target!(|program: String| {
    let mut registry = Registry::default();
    registry.add_variable("x");
    registry.add_variable("y");

    // Any input must either parse or be rejected; neither may panic.
    if let Ok(expr) = registry.parse(&program) {
        let optimized = Optimizer::new().optimize(&expr);
        let _ = optimized.to_string();
    }
});
