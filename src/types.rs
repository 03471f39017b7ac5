use crate::errors::{ErrorContext, FuncError, FuncResult};

/// Outcome of validating a function or one of its building blocks.
///
/// Validation collects every problem it finds instead of stopping at the
/// first one, so callers can report all of them together. Warnings never
/// make a value invalid.
///
/// # Examples
///
/// ```rust
/// use discretized_func::types::ValidationResult;
///
/// let result: ValidationResult = ValidationResult::Warnings((), vec!["y at index 2 is NaN".into()]);
/// assert!(result.is_valid());
/// assert_eq!(result.warnings().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T = ()> {
    /// Valid without remarks.
    Valid(T),
    /// Valid, with warnings.
    Warnings(T, Vec<String>),
    /// Invalid; carries (warnings, errors).
    Invalid(Vec<String>, Vec<String>),
}

impl<T> ValidationResult<T> {
    /// Returns true unless the result is `Invalid`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, ValidationResult::Invalid(_, _))
    }

    /// Returns the warnings attached to this result.
    pub fn warnings(&self) -> &[String] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Warnings(_, warnings) | ValidationResult::Invalid(warnings, _) => {
                warnings
            }
        }
    }

    /// Returns the errors attached to this result.
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationResult::Invalid(_, errors) => errors,
            _ => &[],
        }
    }

    /// Converts the result into a `FuncResult`, turning `Invalid` into an
    /// invalid-configuration error whose message lists every error found.
    ///
    /// Warnings are forwarded to the log at `warn` level.
    pub fn into_result(self, parsing: &str) -> FuncResult<T> {
        match self {
            ValidationResult::Valid(value) => Ok(value),
            ValidationResult::Warnings(value, warnings) => {
                warnings
                    .iter()
                    .for_each(|w| log::warn!("{}: {}", parsing, w));
                Ok(value)
            }
            ValidationResult::Invalid(_, errors) => Err(FuncError::InvalidConfiguration {
                message: errors.join("; "),
                context: ErrorContext::new().with_operation(parsing),
            }),
        }
    }
}

/// Types that can check their own numeric invariants.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}
