//! # Interpolation
//!
//! Linear interpolation between the points of a discretized function, in the
//! linear domain or with either axis transformed by `ln`.
//!
//! ## Quick Start
//!
//! ```rust
//! use discretized_func::{ArbitrarilyDiscretizedFunc, DiscretizedFuncMut, Interpolate};
//!
//! let mut func = ArbitrarilyDiscretizedFunc::new();
//! func.set(1.0, 10.0).unwrap();
//! func.set(3.0, 30.0).unwrap();
//!
//! assert_eq!(func.interpolated_y(2.0).unwrap(), 20.0);
//! assert_eq!(func.first_interpolated_x(25.0).unwrap(), 2.5);
//! assert!(func.interpolated_y(3.5).is_err());
//! ```
//!
//! ## Strategies
//!
//! - **Basic**: locates the segment and computes the value on every call
//! - **Precomputed**: caches each segment's transformed endpoint and slope
//! - **Evenly precomputed**: like precomputed, indexing by `floor` on an even grid
//! - **Repeated use**: basic at first, precomputed once a call count is reached
//!
//! All strategies share one domain policy: queries outside
//! `[min_x - tolerance, max_x + tolerance]` are domain-range errors, queries
//! within tolerance of either end return the end value, and a segment with
//! both values equal to zero yields exactly zero.

pub mod basic;
pub mod evenly;
pub mod precomputed;
pub mod repeated;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    errors::{FuncError, FuncResult},
    function::DiscretizedFunc,
};

pub use basic::BasicInterpolator;
pub use evenly::EvenlyPrecomputedInterpolator;
pub use precomputed::PrecomputedInterpolator;
pub use repeated::RepeatedUseInterpolator;

/// Which axes are log-transformed during interpolation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterpolationOptions {
    pub log_x: bool,
    pub log_y: bool,
}

impl InterpolationOptions {
    pub const LINEAR: Self = Self::new(false, false);
    pub const LOG_X: Self = Self::new(true, false);
    pub const LOG_Y: Self = Self::new(false, true);
    pub const LOG_LOG: Self = Self::new(true, true);

    pub const fn new(log_x: bool, log_y: bool) -> Self {
        InterpolationOptions { log_x, log_y }
    }

    fn transform_x(&self, x: f64) -> f64 {
        if self.log_x { x.ln() } else { x }
    }

    fn transform_y(&self, y: f64) -> f64 {
        if self.log_y { y.ln() } else { y }
    }
}

impl fmt::Display for InterpolationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.log_x, self.log_y) {
            (false, false) => write!(f, "linear"),
            (true, false) => write!(f, "log-x"),
            (false, true) => write!(f, "log-y"),
            (true, true) => write!(f, "log-log"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InterpolationOptionsParseError {
    /// Error when parsing an invalid interpolation mode string.
    #[error("Invalid interpolation mode: {0}")]
    InvalidValue(String),
}

impl FromStr for InterpolationOptions {
    type Err = InterpolationOptionsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::LINEAR),
            "log-x" => Ok(Self::LOG_X),
            "log-y" => Ok(Self::LOG_Y),
            "log-log" => Ok(Self::LOG_LOG),
            _ => Err(InterpolationOptionsParseError::InvalidValue(s.to_string())),
        }
    }
}

/// Forward and inverse interpolation over one function.
pub trait Interpolator {
    fn options(&self) -> InterpolationOptions;

    /// The interpolated y at `x`.
    ///
    /// # Errors
    /// A domain-range error for NaN `x`, for `x` outside the tolerance-padded
    /// domain, or for non-positive x-values when interpolating in log-x.
    fn find_y(&self, x: f64) -> FuncResult<f64>;

    /// The x of the first segment (scanning from low x) whose values bracket
    /// `y`, interpolated within that segment.
    ///
    /// # Errors
    /// A domain-range error if no segment brackets `y`.
    fn find_x(&self, y: f64) -> FuncResult<f64>;
}

/// Where a forward query falls.
pub(crate) enum Lookup {
    /// The query resolved to a stored value without interpolation.
    Value(f64),
    /// The query lies inside segment `i`, between points `i` and `i + 1`.
    Segment(usize),
}

/// Applies the shared domain policy and finds the segment for `x` with the
/// given index search.
pub(crate) fn locate<F, S>(
    func: &F,
    x: f64,
    options: InterpolationOptions,
    index_before: S,
) -> FuncResult<Lookup>
where
    F: DiscretizedFunc + ?Sized,
    S: Fn(f64) -> Option<usize>,
{
    let min_x = func.min_x()?;
    let max_x = func.max_x()?;
    let tolerance = func.tolerance();

    if x.is_nan() || x < min_x - tolerance || x > max_x + tolerance {
        return Err(FuncError::out_of_domain(x, min_x, max_x, tolerance)
            .with_context(func.error_context("interpolating")));
    }
    if options.log_x && x <= 0.0 {
        return Err(FuncError::domain(x, "x must be positive to interpolate in log-x space")
            .with_context(func.error_context("interpolating")));
    }

    let last = func.size() - 1;
    if x <= min_x + tolerance {
        return Ok(Lookup::Value(func.y(0)));
    }
    if x >= max_x - tolerance {
        return Ok(Lookup::Value(func.y(last)));
    }

    Ok(match index_before(x) {
        None => Lookup::Value(func.y(0)),
        Some(i) if i >= last => Lookup::Value(func.y(last)),
        Some(i) => Lookup::Segment(i),
    })
}

/// Inverse interpolation shared by every strategy.
pub(crate) fn first_x_for_y<F>(func: &F, y: f64, options: InterpolationOptions) -> FuncResult<f64>
where
    F: DiscretizedFunc + ?Sized,
{
    if func.is_empty() {
        return Err(FuncError::IndexOutOfBounds { index: 0, size: 0 });
    }

    if func.size() == 1 {
        return if func.y(0) == y {
            Ok(func.x(0))
        } else {
            Err(FuncError::domain(y, "y does not match the only point")
                .with_context(func.error_context("inverse interpolating")))
        };
    }

    for i in 0..func.size() - 1 {
        let (y1, y2) = (func.y(i), func.y(i + 1));
        let descending = y <= y1 && y >= y2 && y2 <= y1;
        let ascending = y >= y1 && y <= y2 && y2 >= y1;
        if !(descending || ascending) {
            continue;
        }

        let (x1, x2) = (func.x(i), func.x(i + 1));
        if y1 == y2 {
            return Ok(x1);
        }
        if options.log_x && (x1 <= 0.0 || x2 <= 0.0) {
            return Err(FuncError::domain(
                x1.min(x2),
                "x-values must be positive to interpolate in log-x space",
            )
            .with_context(func.error_context("inverse interpolating")));
        }

        let (x1, x2) = (options.transform_x(x1), options.transform_x(x2));
        let (yq, y1, y2) = (
            options.transform_y(y),
            options.transform_y(y1),
            options.transform_y(y2),
        );
        let x = ((yq - y1) * (x2 - x1)) / (y2 - y1) + x1;
        return Ok(if options.log_x { x.exp() } else { x });
    }

    Err(FuncError::domain(y, "no segment brackets y")
        .with_context(func.error_context("inverse interpolating")))
}

/// Convenience interpolation on any function, using the basic strategy.
pub trait Interpolate: DiscretizedFunc + Sized {
    fn interpolated_y(&self, x: f64) -> FuncResult<f64> {
        BasicInterpolator::new(self, InterpolationOptions::LINEAR).find_y(x)
    }

    fn interpolated_y_in_log_y(&self, x: f64) -> FuncResult<f64> {
        BasicInterpolator::new(self, InterpolationOptions::LOG_Y).find_y(x)
    }

    fn interpolated_y_in_log_x_log_y(&self, x: f64) -> FuncResult<f64> {
        BasicInterpolator::new(self, InterpolationOptions::LOG_LOG).find_y(x)
    }

    fn first_interpolated_x(&self, y: f64) -> FuncResult<f64> {
        BasicInterpolator::new(self, InterpolationOptions::LINEAR).find_x(y)
    }

    fn first_interpolated_x_in_log_x_log_y(&self, y: f64) -> FuncResult<f64> {
        BasicInterpolator::new(self, InterpolationOptions::LOG_LOG).find_x(y)
    }

    /// Log-y interpolation that extrapolates the first or last segment
    /// (in log-y space) for x outside the domain.
    ///
    /// # Errors
    /// A domain-range error for NaN `x`, or for out-of-domain `x` when the
    /// function has fewer than two points.
    fn interp_extrap_y_in_log_y(&self, x: f64) -> FuncResult<f64> {
        let err = match self.interpolated_y_in_log_y(x) {
            Ok(y) => return Ok(y),
            Err(err) => err,
        };
        if !err.is_domain_range() || x.is_nan() || self.size() < 2 {
            return Err(err);
        }

        let i = if x < self.x(0) { 0 } else { self.size() - 2 };
        let (x1, x2) = (self.x(i), self.x(i + 1));
        let (y1, y2) = (self.y(i).ln(), self.y(i + 1).ln());
        let log_y = y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        Ok(log_y.exp())
    }
}

impl<F: DiscretizedFunc> Interpolate for F {}
