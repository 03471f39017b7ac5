//! Error types shared by every function, interpolator and statistic.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type FuncResult<T> = Result<T, FuncError>;

/// Errors raised by discretized functions and the statistics built on them.
///
/// Every failure is reported before any state is mutated, so a function that
/// returned an error is unchanged.
#[derive(Debug, Error)]
pub enum FuncError {
    /// A query x (or y, fraction, probability) lies outside the supported domain.
    #[error("Value {value} is out of range{context}: {message}")]
    DomainRange {
        value: f64,
        message: String,
        context: ErrorContext,
    },

    /// Construction or configuration parameters are inconsistent.
    #[error("Invalid configuration{context}: {message}")]
    InvalidConfiguration {
        message: String,
        context: ErrorContext,
    },

    /// The storage strategy does not allow this kind of write.
    #[error("Unsupported mutation{context}: {message}")]
    UnsupportedMutation {
        message: String,
        context: ErrorContext,
    },

    /// Direct index access beyond `[0, size)`.
    #[error("Index {index} is out of bounds for a function of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// A statistic has no unique answer (e.g. several non-adjacent modes).
    #[error("Ambiguous statistic{context}: {message}")]
    AmbiguousStatistic {
        message: String,
        context: ErrorContext,
    },

    /// IO error while reading or writing the two-column text format.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in the two-column text format.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl FuncError {
    pub fn domain<S: Into<String>>(value: f64, message: S) -> Self {
        FuncError::DomainRange {
            value,
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        FuncError::InvalidConfiguration {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        FuncError::UnsupportedMutation {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn ambiguous<S: Into<String>>(message: S) -> Self {
        FuncError::AmbiguousStatistic {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    /// Error for an x outside `[min_x - tolerance, max_x + tolerance]`.
    pub fn out_of_domain(x: f64, min_x: f64, max_x: f64, tolerance: f64) -> Self {
        FuncError::domain(
            x,
            format!(
                "x must be within [{}, {}] (tolerance {})",
                min_x, max_x, tolerance
            ),
        )
    }

    /// Replaces the context of variants that carry one. Other variants are
    /// returned unchanged.
    pub fn with_context(mut self, new_context: ErrorContext) -> Self {
        match &mut self {
            FuncError::DomainRange { context, .. }
            | FuncError::InvalidConfiguration { context, .. }
            | FuncError::UnsupportedMutation { context, .. }
            | FuncError::AmbiguousStatistic { context, .. } => *context = new_context,
            _ => {}
        }
        self
    }

    /// Returns true for the domain-range kind.
    pub fn is_domain_range(&self) -> bool {
        matches!(self, FuncError::DomainRange { .. })
    }
}

/// Context information for error reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// Name of the function involved (if it has one).
    pub function: Option<String>,
    /// What was being done when the error occurred.
    pub operation: Option<String>,
}

impl ErrorContext {
    /// Create a new empty error context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error context naming the function involved. Empty names are
    /// ignored.
    pub fn with_function<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        Self {
            function: (!name.is_empty()).then_some(name),
            operation: None,
        }
    }

    /// Add the operation being performed.
    pub fn with_operation<S: Into<String>>(mut self, operation: S) -> Self {
        self.operation = Some(operation.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref function) = self.function {
            write!(f, " in function '{}'", function)?;
        }

        if let Some(ref operation) = self.operation {
            write!(f, " while {}", operation)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let context = ErrorContext::with_function("hazard curve").with_operation("interpolating");
        let message = format!("{}", context);
        assert_eq!(message, " in function 'hazard curve' while interpolating");
    }

    #[test]
    fn test_empty_context_displays_nothing() {
        assert_eq!(format!("{}", ErrorContext::new()), "");
        assert_eq!(format!("{}", ErrorContext::with_function("")), "");
    }

    #[test]
    fn test_out_of_domain_message() {
        let err = FuncError::out_of_domain(5.0, 0.0, 1.0, 0.0);
        assert!(err.is_domain_range());
        let message = err.to_string();
        assert!(message.contains("Value 5 is out of range"));
        assert!(message.contains("[0, 1]"));
    }

    #[test]
    fn test_with_context_only_touches_contextual_variants() {
        let err = FuncError::unsupported("fixed domain")
            .with_context(ErrorContext::with_function("cdf").with_operation("setting x=2"));
        assert_eq!(
            err.to_string(),
            "Unsupported mutation in function 'cdf' while setting x=2: fixed domain"
        );

        let err = FuncError::IndexOutOfBounds { index: 4, size: 2 }
            .with_context(ErrorContext::with_function("ignored"));
        assert_eq!(
            err.to_string(),
            "Index 4 is out of bounds for a function of size 2"
        );
    }
}
