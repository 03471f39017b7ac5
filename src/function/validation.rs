use crate::{
    types::ValidationResult,
    validation_utils::{
        _chain, _return, validate_finite, validate_same_length, validate_separated,
        validate_strictly_ascending, validate_tolerance, warn_non_finite,
    },
};

/// Checks the invariants of tolerance-sorted storage: non-negative tolerance,
/// finite x-values in ascending order, neighbours further apart than the
/// tolerance. Non-finite y-values only produce warnings.
pub fn validate_sorted_points(xs: &[f64], ys: &[f64], tolerance: f64) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let w = &mut warnings;
    let e = &mut errors;

    _chain(validate_tolerance(tolerance), w, e);
    _chain(validate_same_length(xs, ys), w, e);
    _chain(validate_finite(xs), w, e);
    _chain(validate_strictly_ascending(xs), w, e);
    _chain(validate_separated(xs, tolerance), w, e);
    _chain(warn_non_finite(ys), w, e);
    _return(warnings, errors)
}

/// Same checks for the empirical sample set, where merging is exact and the
/// separation test reduces to strict ordering.
pub fn validate_samples(xs: &[f64], weights: &[f64]) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let w = &mut warnings;
    let e = &mut errors;

    _chain(validate_same_length(xs, weights), w, e);
    _chain(validate_strictly_ascending(xs), w, e);
    _chain(warn_non_finite(weights), w, e);

    for (i, weight) in weights.iter().enumerate() {
        if *weight < 0.0 {
            warnings.push(format!("weight at index {} is negative: {}", i, weight));
        }
    }

    _return(warnings, errors)
}

/// Checks the evenly-spaced grid parameters.
pub fn validate_grid(min_x: f64, max_x: f64, num: usize) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    if num == 0 {
        errors.push("num points must be > 0".to_string());
    }

    if min_x.is_nan() || max_x.is_nan() {
        errors.push("grid bounds cannot be NaN.".to_string());
    } else if min_x.is_infinite() || max_x.is_infinite() {
        errors.push("grid bounds cannot be infinite.".to_string());
    } else if min_x > max_x {
        errors.push(format!("min_x ({}) cannot be greater than max_x ({})", min_x, max_x));
    } else if num == 1 && min_x != max_x {
        errors.push(format!(
            "num points is 1 but min_x ({}) and max_x ({}) differ",
            min_x, max_x
        ));
    } else if num > 1 && min_x == max_x {
        errors.push(format!(
            "min_x equals max_x ({}) but num points is {}",
            min_x, num
        ));
    }

    _return(warnings, errors)
}

/// Checks a fixed-x array pair: equal lengths and strictly ascending x.
pub fn validate_fixed_arrays(xs: &[f64], ys: &[f64]) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let w = &mut warnings;
    let e = &mut errors;

    _chain(validate_same_length(xs, ys), w, e);
    _chain(validate_strictly_ascending(xs), w, e);
    _return(warnings, errors)
}
