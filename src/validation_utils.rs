use std::fmt;

use crate::types::ValidationResult;

pub fn _chain<T>(
    result: ValidationResult<T>,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    match result {
        ValidationResult::Valid(_) => {}
        ValidationResult::Warnings(_, warns) => {
            warnings.extend(warns);
        }
        ValidationResult::Invalid(warns, errs) => {
            warnings.extend(warns);
            errors.extend(errs);
        }
    }
}

pub fn _return(warnings: Vec<String>, errors: Vec<String>) -> ValidationResult {
    if !errors.is_empty() {
        ValidationResult::Invalid(warnings, errors)
    } else if !warnings.is_empty() {
        ValidationResult::Warnings((), warnings)
    } else {
        ValidationResult::Valid(())
    }
}

pub fn validate_ascending<V: PartialOrd + fmt::Display>(values: &[V]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for i in 1..values.len() {
        if values[i] < values[i - 1] {
            errors.push(format!(
                "values are not in ascending order: {} > {} at index {}",
                values[i - 1],
                values[i],
                i
            ));
        }
    }

    _return(warnings, errors)
}

/// Like `validate_ascending`, but equal neighbours are also rejected.
pub fn validate_strictly_ascending(values: &[f64]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for i in 1..values.len() {
        // written negated so that NaN neighbours are rejected too
        if !(values[i] > values[i - 1]) {
            errors.push(format!(
                "values are not strictly ascending: {} then {} at index {}",
                values[i - 1],
                values[i],
                i
            ));
        }
    }

    _return(warnings, errors)
}

/// Rejects x-values closer than `tolerance` to their neighbour.
pub fn validate_separated(values: &[f64], tolerance: f64) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for i in 1..values.len() {
        if (values[i] - values[i - 1]).abs() <= tolerance {
            errors.push(format!(
                "values {} and {} at index {} are within tolerance {}",
                values[i - 1],
                values[i],
                i,
                tolerance
            ));
        }
    }

    _return(warnings, errors)
}

pub fn validate_finite(values: &[f64]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for (i, &value) in values.iter().enumerate() {
        if value.is_nan() || value.is_infinite() {
            errors.push(format!(
                "value at index {} is not a valid number: {}",
                i, value
            ));
        }
    }

    _return(warnings, errors)
}

/// Same checks as `validate_finite`, reported as warnings.
pub fn warn_non_finite(values: &[f64]) -> ValidationResult {
    match validate_finite(values) {
        ValidationResult::Invalid(mut warnings, errors) => {
            warnings.extend(errors);
            _return(warnings, Vec::new())
        }
        other => other,
    }
}

pub fn validate_non_empty(values: &[f64]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    if values.is_empty() {
        errors.push("values cannot be empty.".to_string());
    }

    _return(warnings, errors)
}

pub fn validate_same_length(a: &[f64], b: &[f64]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    if a.len() != b.len() {
        errors.push(format!(
            "array lengths differ: {} x-values and {} y-values",
            a.len(),
            b.len()
        ));
    }

    _return(warnings, errors)
}

pub fn validate_tolerance(tolerance: f64) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    if !(tolerance >= 0.0) {
        errors.push(format!("tolerance must be >= 0, got {}", tolerance));
    }

    _return(warnings, errors)
}
