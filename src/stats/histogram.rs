//! Histograms over evenly spaced bins.

use crate::{
    containers::{Container, ContainerMut},
    errors::{FuncError, FuncResult},
    function::{DiscretizedFunc, DiscretizedFuncMut, EvenlyDiscretizedFunc, FuncMetadata},
    types::{Validate, ValidationResult},
};

/// An evenly discretized function whose points are bin centers.
///
/// The lookup tolerance is the bin width, so any x inside a bin (and up to
/// one width beyond the outer centers) resolves to that bin.
///
/// # Examples
///
/// ```rust
/// use discretized_func::{DiscretizedFunc, HistogramFunction};
///
/// let mut hist = HistogramFunction::new(0.5, 10, 1.0).unwrap();
/// hist.add(3.2, 1.0).unwrap();
/// hist.add(3.9, 1.0).unwrap();
/// assert_eq!(hist.y(3), 1.0);
/// assert_eq!(hist.y(4), 1.0);
/// assert_eq!(hist.mode(), 3.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramFunction {
    bins: EvenlyDiscretizedFunc,
    width: f64,
}

impl HistogramFunction {
    /// Bins centered on `min_x + i * delta` for `i` in `[0, num)`.
    ///
    /// # Errors
    /// An invalid-configuration error for a non-positive `delta` or a zero
    /// `num`.
    pub fn new(min_x: f64, num: usize, delta: f64) -> FuncResult<Self> {
        if !(delta > 0.0) {
            return Err(FuncError::config(format!("bin width must be > 0, got {}", delta)));
        }
        Self::wrap(EvenlyDiscretizedFunc::new(min_x, num, delta)?, delta)
    }

    /// Bins centered on `num` evenly spaced points from `min_x` to `max_x`.
    pub fn from_range(min_x: f64, max_x: f64, num: usize) -> FuncResult<Self> {
        let bins = EvenlyDiscretizedFunc::from_range(min_x, max_x, num)?;
        let width = bins.delta();
        Self::wrap(bins, width)
    }

    /// The smallest histogram of width `delta` whose bins contain both
    /// `min` and `max`. Bin centers fall on multiples of `delta` when
    /// `center_on_zero` is set, and halfway between them otherwise.
    pub fn encompassing_histogram(
        min: f64,
        max: f64,
        delta: f64,
        center_on_zero: bool,
    ) -> FuncResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FuncError::config(format!(
                "histogram bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if !(min <= max) {
            return Err(FuncError::config(format!(
                "min ({}) must not exceed max ({})",
                min, max
            )));
        }
        if !(delta > 0.0) {
            return Err(FuncError::config(format!("bin width must be > 0, got {}", delta)));
        }

        let offset = if center_on_zero { 0.0 } else { delta / 2.0 };
        let bin_of = |x: f64| ((x - offset) / delta + 0.5).floor();
        let (first, last) = (bin_of(min), bin_of(max));
        let span = last - first;
        let max_bins = (isize::MAX as usize / std::mem::size_of::<f64>()) as f64;
        if !(span.is_finite() && span < max_bins) {
            return Err(FuncError::config(format!(
                "[{}, {}] spans too many bins of width {}",
                min, max, delta
            )));
        }
        let num = span as usize + 1;

        Self::new(first * delta + offset, num, delta)
    }

    fn wrap(mut bins: EvenlyDiscretizedFunc, width: f64) -> FuncResult<Self> {
        bins.set_tolerance(width)?;
        Ok(HistogramFunction { bins, width })
    }

    pub fn bin_width(&self) -> f64 {
        self.width
    }

    pub fn bins(&self) -> &EvenlyDiscretizedFunc {
        &self.bins
    }

    /// Index of the bin containing `x`, clamped to the histogram.
    pub fn closest_x_index(&self, x: f64) -> usize {
        self.bins.closest_x_index(x)
    }

    /// The `size() + 1` bin boundaries in ascending order.
    pub fn bin_edges(&self) -> Vec<f64> {
        let half = self.width / 2.0;
        let mut edges: Vec<f64> = (0..self.size()).map(|i| self.x(i) - half).collect();
        edges.push(self.x(self.size() - 1) + half);
        edges
    }

    /// Adds `y` to the bin containing `x`.
    ///
    /// # Errors
    /// A domain-range error if `x` is more than one bin width beyond the
    /// outer bin centers.
    pub fn add(&mut self, x: f64, y: f64) -> FuncResult<()> {
        self.bins.add(x, y)
    }

    /// Adds `y` to the bin at `index`.
    pub fn add_at(&mut self, index: usize, y: f64) -> FuncResult<()> {
        self.bins.add_at(index, y)
    }

    /// Scales the bins so that they sum to one.
    ///
    /// # Errors
    /// An invalid-configuration error if the bins sum to zero.
    pub fn normalize_by_sum_of_y_vals(&mut self) -> FuncResult<()> {
        let total = self.sum_of_y();
        if total == 0.0 {
            return Err(FuncError::config("cannot normalize a histogram whose bins sum to zero")
                .with_context(self.error_context("normalizing")));
        }
        self.bins.values_mut().iter_mut().for_each(|y| *y /= total);
        Ok(())
    }

    /// Running sum of the bins, reported at the bin centers.
    pub fn cumulative_dist_function(&self) -> FuncResult<HistogramFunction> {
        let mut cumulative = self.clone();
        self.fill_cumulative(&mut cumulative.bins);
        Ok(cumulative)
    }

    /// Running sum of the bins, reported at the upper bin edges.
    pub fn cumulative_dist_function_with_half_bin_offset(
        &self,
    ) -> FuncResult<EvenlyDiscretizedFunc> {
        let min_x = self.bins.min_x()? + self.width / 2.0;
        let mut cumulative = EvenlyDiscretizedFunc::new(min_x, self.size(), self.width)?;
        cumulative.metadata = self.metadata().clone();
        self.fill_cumulative(&mut cumulative);
        Ok(cumulative)
    }

    fn fill_cumulative(&self, target: &mut EvenlyDiscretizedFunc) {
        let mut running = 0.0;
        for (slot, &y) in target.values_mut().iter_mut().zip(self.values()) {
            running += y;
            *slot = running;
        }
    }

    /// Center of the first bin holding the largest value.
    pub fn mode(&self) -> f64 {
        self.x(self.bins.x_index_for_max_y())
    }

    /// Mean of the bin centers, weighted by the bin values.
    pub fn compute_mean(&self) -> f64 {
        let (sum_xy, sum_y) = (0..self.size())
            .fold((0.0, 0.0), |(sxy, sy), i| (sxy + self.x(i) * self.y(i), sy + self.y(i)));
        sum_xy / sum_y
    }

    /// Weighted population standard deviation of the bin centers.
    pub fn compute_std_dev(&self) -> f64 {
        let mean = self.compute_mean();
        let (sum_sq, sum_y) = (0..self.size()).fold((0.0, 0.0), |(ss, sy), i| {
            let dev = self.x(i) - mean;
            (ss + dev * dev * self.y(i), sy + self.y(i))
        });
        (sum_sq / sum_y).sqrt()
    }

    /// Coefficient of variation, `std_dev / mean`.
    pub fn compute_cov(&self) -> f64 {
        self.compute_std_dev() / self.compute_mean()
    }
}

impl DiscretizedFunc for HistogramFunction {
    fn size(&self) -> usize {
        self.bins.size()
    }

    fn x(&self, index: usize) -> f64 {
        self.bins.x(index)
    }

    fn y(&self, index: usize) -> f64 {
        self.bins.y(index)
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        self.bins.x_index(x)
    }

    fn x_index_before(&self, x: f64) -> Option<usize> {
        self.bins.x_index_before(x)
    }

    fn min_x(&self) -> FuncResult<f64> {
        self.bins.min_x()
    }

    fn max_x(&self) -> FuncResult<f64> {
        self.bins.max_x()
    }

    fn tolerance(&self) -> f64 {
        self.bins.tolerance()
    }

    fn metadata(&self) -> &FuncMetadata {
        self.bins.metadata()
    }
}

impl DiscretizedFuncMut for HistogramFunction {
    fn set(&mut self, x: f64, y: f64) -> FuncResult<()> {
        self.bins.set(x, y)
    }

    fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()> {
        self.bins.set_y(index, y)
    }

    fn set_tolerance(&mut self, _tolerance: f64) -> FuncResult<()> {
        Err(FuncError::unsupported("histogram tolerance is fixed to the bin width")
            .with_context(self.error_context("setting tolerance")))
    }

    fn set_metadata(&mut self, metadata: FuncMetadata) -> FuncResult<()> {
        self.bins.set_metadata(metadata)
    }
}

impl Container for HistogramFunction {
    fn values(&self) -> &[f64] {
        self.bins.values()
    }
}

impl ContainerMut for HistogramFunction {
    fn values_mut(&mut self) -> &mut [f64] {
        self.bins.values_mut()
    }
}

impl Validate for HistogramFunction {
    fn validate(&self) -> ValidationResult {
        self.bins.validate()
    }
}
