use super::{InterpolationOptions, Interpolator, Lookup, first_x_for_y, locate};
use crate::{
    errors::{FuncError, FuncResult},
    function::DiscretizedFunc,
};

/// Interpolates by locating the segment and evaluating it on every call.
#[derive(Debug, Clone, Copy)]
pub struct BasicInterpolator<'a, F> {
    func: &'a F,
    options: InterpolationOptions,
}

impl<'a, F: DiscretizedFunc> BasicInterpolator<'a, F> {
    pub fn new(func: &'a F, options: InterpolationOptions) -> Self {
        BasicInterpolator { func, options }
    }

    pub fn func(&self) -> &'a F {
        self.func
    }
}

/// Evaluates segment `i` of `func` at `x`.
pub(crate) fn interpolate_segment<F>(
    func: &F,
    i: usize,
    x: f64,
    options: InterpolationOptions,
) -> FuncResult<f64>
where
    F: DiscretizedFunc + ?Sized,
{
    let (x1, x2) = (func.x(i), func.x(i + 1));
    let (y1, y2) = (func.y(i), func.y(i + 1));

    if y1 == 0.0 && y2 == 0.0 {
        return Ok(0.0);
    }
    if options.log_x && x1 <= 0.0 {
        return Err(FuncError::domain(
            x1,
            "x-values must be positive to interpolate in log-x space",
        )
        .with_context(func.error_context("interpolating")));
    }

    let (x, x1, x2) = (
        options.transform_x(x),
        options.transform_x(x1),
        options.transform_x(x2),
    );
    let (y1, y2) = (options.transform_y(y1), options.transform_y(y2));

    let y = y1 + (y2 - y1) / (x2 - x1) * (x - x1);
    Ok(if options.log_y { y.exp() } else { y })
}

impl<F: DiscretizedFunc> Interpolator for BasicInterpolator<'_, F> {
    fn options(&self) -> InterpolationOptions {
        self.options
    }

    fn find_y(&self, x: f64) -> FuncResult<f64> {
        let lookup = locate(self.func, x, self.options, |x| self.func.x_index_before(x))?;
        match lookup {
            Lookup::Value(y) => Ok(y),
            Lookup::Segment(i) => interpolate_segment(self.func, i, x, self.options),
        }
    }

    fn find_x(&self, y: f64) -> FuncResult<f64> {
        first_x_for_y(self.func, y, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{
        ArbitrarilyDiscretizedFunc, DiscretizedFuncMut, EvenlyDiscretizedFunc,
    };

    fn hazard_curve() -> ArbitrarilyDiscretizedFunc {
        let mut func = ArbitrarilyDiscretizedFunc::named("hazard");
        for (x, y) in [(0.01, 0.5), (0.1, 0.05), (1.0, 0.001), (10.0, 0.0)] {
            func.set(x, y).unwrap();
        }
        func
    }

    mod linear_tests {
        use super::*;

        #[test]
        fn test_midpoints() {
            let mut func = ArbitrarilyDiscretizedFunc::new();
            func.set(0.0, 0.0).unwrap();
            func.set(2.0, 4.0).unwrap();
            func.set(4.0, 0.0).unwrap();

            let interp = BasicInterpolator::new(&func, InterpolationOptions::LINEAR);
            assert_eq!(interp.find_y(1.0).unwrap(), 2.0);
            assert_eq!(interp.find_y(3.0).unwrap(), 2.0);
            assert_eq!(interp.find_y(2.0).unwrap(), 4.0);
        }

        #[test]
        fn test_boundaries_snap() {
            let func = hazard_curve();
            let interp = BasicInterpolator::new(&func, InterpolationOptions::LINEAR);
            assert_eq!(interp.find_y(0.01).unwrap(), 0.5);
            assert_eq!(interp.find_y(10.0).unwrap(), 0.0);
        }

        #[test]
        fn test_out_of_domain() {
            let func = hazard_curve();
            let interp = BasicInterpolator::new(&func, InterpolationOptions::LINEAR);
            assert!(interp.find_y(0.009).unwrap_err().is_domain_range());
            assert!(interp.find_y(10.5).unwrap_err().is_domain_range());
            assert!(interp.find_y(f64::NAN).unwrap_err().is_domain_range());
        }

        #[test]
        fn test_tolerance_widens_domain() {
            let mut func = EvenlyDiscretizedFunc::new(0.0, 3, 1.0).unwrap();
            func.set_y(0, 1.0).unwrap();
            func.set_y(2, 5.0).unwrap();
            func.set_tolerance(0.1).unwrap();

            let interp = BasicInterpolator::new(&func, InterpolationOptions::LINEAR);
            assert_eq!(interp.find_y(-0.05).unwrap(), 1.0);
            assert_eq!(interp.find_y(2.05).unwrap(), 5.0);
            assert!(interp.find_y(2.2).is_err());
        }

        #[test]
        fn test_empty_function() {
            let func = ArbitrarilyDiscretizedFunc::new();
            let interp = BasicInterpolator::new(&func, InterpolationOptions::LINEAR);
            assert!(matches!(
                interp.find_y(0.0),
                Err(FuncError::IndexOutOfBounds { .. })
            ));
        }
    }

    mod log_tests {
        use super::*;

        #[test]
        fn test_log_log_is_exact_for_power_laws() {
            let mut func = ArbitrarilyDiscretizedFunc::new();
            for x in [1.0, 10.0, 100.0] {
                func.set(x, 1.0 / (x * x)).unwrap();
            }
            let interp = BasicInterpolator::new(&func, InterpolationOptions::LOG_LOG);
            let y = interp.find_y(5.0).unwrap();
            assert!((y - 0.04).abs() < 1e-12);
        }

        #[test]
        fn test_zero_segment_yields_zero() {
            let mut func = ArbitrarilyDiscretizedFunc::new();
            for (x, y) in [(1.0, 1.0), (2.0, 0.0), (3.0, 0.0)] {
                func.set(x, y).unwrap();
            }
            let interp = BasicInterpolator::new(&func, InterpolationOptions::LOG_Y);
            assert_eq!(interp.find_y(2.5).unwrap(), 0.0);
        }

        #[test]
        fn test_log_x_rejects_non_positive() {
            let mut func = ArbitrarilyDiscretizedFunc::new();
            for (x, y) in [(-1.0, 1.0), (0.0, 2.0), (1.0, 3.0)] {
                func.set(x, y).unwrap();
            }
            let interp = BasicInterpolator::new(&func, InterpolationOptions::LOG_X);
            assert!(interp.find_y(-0.5).unwrap_err().is_domain_range());
            assert!(interp.find_y(0.5).unwrap_err().is_domain_range());
        }
    }
}
