//! # discretized-func
//!
//! Discretized functions (ordered `(x, y)` samples of a continuous function)
//! with interchangeable storage strategies, linear and logarithmic
//! interpolation, and the statistics built on top of them: weighted empirical
//! distributions, weighted integer sampling and histograms.
//!
//! ## Quick Start
//!
//! ```rust
//! use discretized_func::{
//!     ArbitrarilyDiscretizedFunc, DiscretizedFuncMut, Interpolate, InterpolationOptions,
//!     Interpolator, PrecomputedInterpolator,
//! };
//!
//! let mut curve = ArbitrarilyDiscretizedFunc::named("exceedance");
//! curve.set(0.01, 1e-1).unwrap();
//! curve.set(0.1, 1e-3).unwrap();
//! curve.set(1.0, 1e-6).unwrap();
//!
//! let y = curve.interpolated_y(0.055).unwrap();
//! assert!((y - 0.0505).abs() < 1e-12);
//!
//! let interp = PrecomputedInterpolator::new(&curve, InterpolationOptions::LOG_LOG).unwrap();
//! assert!((interp.find_y(0.1).unwrap() - 1e-3).abs() < 1e-15);
//! ```

pub mod containers;
pub mod core;
pub mod errors;
pub mod function;
pub mod interpolate;
pub mod io;
pub mod stats;
pub mod types;
pub mod validation_utils;

pub use crate::core::Point;
pub use crate::errors::{ErrorContext, FuncError, FuncResult};
pub use crate::function::{
    ArbitrarilyDiscretizedFunc, DiscretizedFunc, DiscretizedFuncMut, EvenlyDiscretizedFunc,
    FuncMetadata, LightFixedXFunc, UnmodifiableFunc,
};
pub use crate::interpolate::{
    BasicInterpolator, EvenlyPrecomputedInterpolator, Interpolate, InterpolationOptions,
    Interpolator, PrecomputedInterpolator, RepeatedUseInterpolator,
};
pub use crate::io::FunctionRecord;
pub use crate::stats::{EmpiricalDistribution, HistogramFunction, IntegerPdfSampler};
pub use crate::types::{Validate, ValidationResult};
