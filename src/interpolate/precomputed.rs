use super::{InterpolationOptions, Interpolator, Lookup, first_x_for_y, locate};
use crate::{
    errors::{FuncError, FuncResult},
    function::DiscretizedFunc,
};

/// Cached form of one segment: transformed left endpoint and slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub slope: f64,
    /// Both endpoint values are zero.
    pub zero: bool,
}

/// Transforms and caches every segment of `func`.
pub(crate) fn build_segments<F>(
    func: &F,
    options: InterpolationOptions,
) -> FuncResult<Vec<Segment>>
where
    F: DiscretizedFunc + ?Sized,
{
    if options.log_x {
        if let Some(i) = (0..func.size()).find(|&i| func.x(i) <= 0.0) {
            return Err(FuncError::config(format!(
                "x-value {} at index {} is not positive; cannot interpolate in log-x space",
                func.x(i),
                i
            ))
            .with_context(func.error_context("precomputing segments")));
        }
    }

    Ok((0..func.size().saturating_sub(1))
        .map(|i| {
            let (raw_y1, raw_y2) = (func.y(i), func.y(i + 1));
            let x1 = options.transform_x(func.x(i));
            let x2 = options.transform_x(func.x(i + 1));
            let (y1, y2) = (options.transform_y(raw_y1), options.transform_y(raw_y2));
            Segment {
                x1,
                y1,
                slope: (y2 - y1) / (x2 - x1),
                zero: raw_y1 == 0.0 && raw_y2 == 0.0,
            }
        })
        .collect())
}

/// Evaluates a cached segment. Matches the basic strategy bit for bit.
pub(crate) fn evaluate(segment: &Segment, x: f64, options: InterpolationOptions) -> f64 {
    if segment.zero {
        return 0.0;
    }
    let y = segment.y1 + segment.slope * (options.transform_x(x) - segment.x1);
    if options.log_y { y.exp() } else { y }
}

/// Interpolator that precomputes each segment once.
///
/// The function is borrowed for the interpolator's lifetime, so the cached
/// segments cannot go stale.
///
/// # Examples
///
/// ```rust
/// use discretized_func::{
///     ArbitrarilyDiscretizedFunc, DiscretizedFuncMut, InterpolationOptions, Interpolator,
///     PrecomputedInterpolator,
/// };
///
/// let mut func = ArbitrarilyDiscretizedFunc::new();
/// func.set(1.0, 1.0).unwrap();
/// func.set(4.0, 7.0).unwrap();
///
/// let interp = PrecomputedInterpolator::new(&func, InterpolationOptions::LINEAR).unwrap();
/// assert_eq!(interp.find_y(2.0).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct PrecomputedInterpolator<'a, F> {
    func: &'a F,
    options: InterpolationOptions,
    segments: Vec<Segment>,
}

impl<'a, F: DiscretizedFunc> PrecomputedInterpolator<'a, F> {
    /// # Errors
    /// An invalid-configuration error if log-x is requested and any x-value
    /// is not positive.
    pub fn new(func: &'a F, options: InterpolationOptions) -> FuncResult<Self> {
        Ok(PrecomputedInterpolator {
            func,
            options,
            segments: build_segments(func, options)?,
        })
    }
}

impl<F: DiscretizedFunc> Interpolator for PrecomputedInterpolator<'_, F> {
    fn options(&self) -> InterpolationOptions {
        self.options
    }

    fn find_y(&self, x: f64) -> FuncResult<f64> {
        let lookup = locate(self.func, x, self.options, |x| self.func.x_index_before(x))?;
        Ok(match lookup {
            Lookup::Value(y) => y,
            Lookup::Segment(i) => evaluate(&self.segments[i], x, self.options),
        })
    }

    fn find_x(&self, y: f64) -> FuncResult<f64> {
        first_x_for_y(self.func, y, self.options)
    }
}
