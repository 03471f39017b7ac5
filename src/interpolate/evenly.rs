use super::{
    InterpolationOptions, Interpolator, Lookup, first_x_for_y, locate,
    precomputed::{Segment, build_segments, evaluate},
};
use crate::{
    errors::{FuncError, FuncResult},
    function::{DiscretizedFunc, EvenlyDiscretizedFunc, evenly::evenly_index_before},
};

/// Precomputed interpolator for evenly spaced functions.
///
/// Segments are found with `floor((x - min_x) / delta)` instead of a binary
/// search. Only linear x is supported.
#[derive(Debug, Clone)]
pub struct EvenlyPrecomputedInterpolator<'a> {
    func: &'a EvenlyDiscretizedFunc,
    options: InterpolationOptions,
    min_x: f64,
    delta: f64,
    segments: Vec<Segment>,
}

impl<'a> EvenlyPrecomputedInterpolator<'a> {
    /// # Errors
    /// An invalid-configuration error if `options.log_x` is set.
    pub fn new(func: &'a EvenlyDiscretizedFunc, options: InterpolationOptions) -> FuncResult<Self> {
        if options.log_x {
            return Err(FuncError::config(
                "log-x interpolation is not supported on an evenly spaced grid",
            )
            .with_context(func.error_context("precomputing segments")));
        }

        Ok(EvenlyPrecomputedInterpolator {
            func,
            options,
            min_x: func.min_x()?,
            delta: func.delta(),
            segments: build_segments(func, options)?,
        })
    }
}

impl Interpolator for EvenlyPrecomputedInterpolator<'_> {
    fn options(&self) -> InterpolationOptions {
        self.options
    }

    fn find_y(&self, x: f64) -> FuncResult<f64> {
        let size = self.segments.len() + 1;
        let lookup = locate(self.func, x, self.options, |x| {
            evenly_index_before(self.min_x, self.delta, size, x)
        })?;
        Ok(match lookup {
            Lookup::Value(y) => y,
            Lookup::Segment(i) => evaluate(&self.segments[i], x, self.options),
        })
    }

    fn find_x(&self, y: f64) -> FuncResult<f64> {
        first_x_for_y(self.func, y, self.options)
    }
}
