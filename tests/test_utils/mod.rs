#![allow(dead_code)]

use discretized_func::{ArbitrarilyDiscretizedFunc, DiscretizedFuncMut};

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds an arbitrarily spaced function from `(x, y)` pairs.
pub fn arbitrary(points: &[(f64, f64)]) -> ArbitrarilyDiscretizedFunc {
    let mut func = ArbitrarilyDiscretizedFunc::new();
    for &(x, y) in points {
        func.set(x, y).unwrap();
    }
    func
}

/// A decaying hazard curve spanning several decades on both axes.
pub fn hazard_curve() -> ArbitrarilyDiscretizedFunc {
    let mut func = ArbitrarilyDiscretizedFunc::named("hazard curve");
    for i in 0..20 {
        let x = 0.005 * 1.4f64.powi(i);
        func.set(x, 0.2 * (-3.0 * x).exp() + 1e-8).unwrap();
    }
    func
}
