//! Weighted empirical distributions and the fractile calculations built on
//! their cumulative distributions.
//!
//! [`EmpiricalDistribution`] collects `(value, weight)` samples one at a
//! time, summing the weights of repeated values. For one-shot work on large
//! sample sets, [`calc_quick_norm_cdf`] sorts once and builds the normalized
//! CDF directly, and [`calc_fractile_from_norm_cdf`] reads fractiles back
//! from it with a binary search.

use itertools::Itertools;
use log::debug;

use crate::{
    containers::{Container, MergePolicy, ToleranceSortedList},
    core::Point,
    errors::{FuncError, FuncResult},
    function::{DiscretizedFunc, DiscretizedFuncMut, FuncMetadata, LightFixedXFunc},
    interpolate::{InterpolationOptions, first_x_for_y},
    types::{Validate, ValidationResult},
};

/// A weighted sample set over arbitrary values.
///
/// Values are compared exactly (zero tolerance): adding a value that is
/// already present adds to its weight.
///
/// # Examples
///
/// ```rust
/// use discretized_func::EmpiricalDistribution;
///
/// let mut dist = EmpiricalDistribution::new();
/// dist.add(2.0, 1.0).unwrap();
/// dist.add(3.0, 1.0).unwrap();
/// dist.add(4.0, 1.0).unwrap();
///
/// assert_eq!(dist.mean(), 3.0);
/// assert_eq!(dist.discrete_fractile(0.5).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    samples: ToleranceSortedList,
    pub metadata: FuncMetadata,
}

impl Default for EmpiricalDistribution {
    fn default() -> Self {
        Self::new()
    }
}

impl EmpiricalDistribution {
    pub fn new() -> Self {
        EmpiricalDistribution {
            samples: ToleranceSortedList::exact(MergePolicy::Sum),
            metadata: FuncMetadata::default(),
        }
    }

    /// Builds a distribution from parallel values and weights.
    pub fn from_samples(values: &[f64], weights: &[f64]) -> FuncResult<Self> {
        crate::validation_utils::validate_same_length(values, weights)
            .into_result("building empirical distribution")?;

        let mut dist = Self::new();
        for (&value, &weight) in values.iter().zip(weights) {
            dist.add(value, weight)?;
        }
        Ok(dist)
    }

    /// Adds `weight` to `value`, creating the value if needed.
    ///
    /// # Errors
    /// A domain-range error for a NaN value.
    pub fn add(&mut self, value: f64, weight: f64) -> FuncResult<()> {
        self.samples.add(Point::new(value, weight)).map(|_| ())
    }

    pub fn sum_of_all_weights(&self) -> f64 {
        self.samples.values().iter().sum()
    }

    /// Running sum of the weights, `y(i) = sum(weight(0..=i))`.
    pub fn cumulative_distribution(&self) -> FuncResult<LightFixedXFunc> {
        self.cumulative(1.0)
    }

    /// Cumulative distribution scaled so that the last value is one.
    ///
    /// # Errors
    /// An invalid-configuration error if the weights sum to zero.
    pub fn normalized_cumulative_distribution(&self) -> FuncResult<LightFixedXFunc> {
        let total = self.checked_total("normalizing cumulative distribution")?;
        self.cumulative(total)
    }

    /// Copy of the distribution with weights scaled to sum to one.
    pub fn normalized_distribution(&self) -> FuncResult<LightFixedXFunc> {
        let total = self.checked_total("normalizing distribution")?;
        let ys = self.samples.values().iter().map(|w| w / total).collect();
        let func = LightFixedXFunc::new(self.samples.xs().to_vec(), ys)?;
        Ok(func.with_metadata(self.metadata.clone()))
    }

    /// The value at which the normalized CDF reaches `fraction`, interpolated
    /// between samples. Fractions below the first CDF value give the
    /// smallest sample.
    ///
    /// # Errors
    /// A domain-range error if `fraction` is outside `[0, 1]`.
    pub fn interpolated_fractile(&self, fraction: f64) -> FuncResult<f64> {
        check_fraction(fraction)?;
        let cdf = self.normalized_cumulative_distribution()?;
        if fraction < cdf.min_y()? {
            return cdf.min_x();
        }
        first_x_for_y(&cdf, fraction, InterpolationOptions::LINEAR)
    }

    /// The first sample whose normalized cumulative weight is at least
    /// `fraction`. Rounding in the running sum can leave the last CDF value
    /// just below one; the largest sample is returned in that case.
    pub fn discrete_fractile(&self, fraction: f64) -> FuncResult<f64> {
        check_fraction(fraction)?;
        let cdf = self.normalized_cumulative_distribution()?;
        let index = cdf
            .ys()
            .iter()
            .position(|&cumulative| fraction <= cumulative)
            .unwrap_or(cdf.size() - 1);
        Ok(cdf.x(index))
    }

    /// Weighted mean of the values.
    pub fn mean(&self) -> f64 {
        let (sum_xy, sum_y) = self
            .samples
            .iter()
            .fold((0.0, 0.0), |(sxy, sy), p| (sxy + p.x * p.y, sy + p.y));
        sum_xy / sum_y
    }

    /// Weighted population standard deviation.
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let (sum_sq, sum_y) = self.samples.iter().fold((0.0, 0.0), |(ss, sy), p| {
            let dev = mean - p.x;
            (ss + dev * dev * p.y, sy + p.y)
        });
        (sum_sq / sum_y).sqrt()
    }

    /// Coefficient of variation, `std_dev / mean`.
    pub fn cov(&self) -> f64 {
        self.std_dev() / self.mean()
    }

    /// The value carrying the largest weight. Two adjacent values tied for
    /// the maximum give their midpoint.
    ///
    /// # Errors
    /// An ambiguous-statistic error when the maximum is shared by values that
    /// are not adjacent, or an index error for an empty distribution.
    pub fn apparent_mode(&self) -> FuncResult<f64> {
        let ys = self.samples.values();
        let mut index: Option<usize> = None;
        let mut max_y = f64::NEG_INFINITY;
        let mut tie = false;

        for (i, &y) in ys.iter().enumerate() {
            if y > max_y {
                max_y = y;
                index = Some(i);
                tie = false;
            } else if y == max_y {
                if index.map(|m| m + 1) == Some(i) {
                    tie = true;
                } else {
                    return Err(FuncError::ambiguous(format!(
                        "maximum weight {} is shared by non-adjacent values",
                        max_y
                    ))
                    .with_context(self.error_context("computing apparent mode")));
                }
            }
        }

        let index = index.ok_or(FuncError::IndexOutOfBounds { index: 0, size: 0 })?;
        let xs = self.samples.xs();
        Ok(if tie {
            (xs[index] + xs[index + 1]) / 2.0
        } else {
            xs[index]
        })
    }

    /// Among the values sharing the maximum weight, the middle one (the
    /// upper of the two middle ones for an even count).
    pub fn most_central_mode(&self) -> FuncResult<f64> {
        let max_y = self.max_y()?;
        let modes: Vec<f64> = self
            .samples
            .iter()
            .filter(|p| p.y == max_y)
            .map(|p| p.x)
            .collect();
        modes.get(modes.len() / 2).copied().ok_or_else(|| {
            FuncError::ambiguous("no value carries the maximum weight")
                .with_context(self.error_context("computing most central mode"))
        })
    }

    /// True if more than one value carries the maximum weight.
    pub fn is_multi_modal(&self) -> bool {
        match self.max_y() {
            Ok(max_y) => self.samples.values().iter().filter(|&&y| y == max_y).count() > 1,
            Err(_) => false,
        }
    }

    /// The interpolated fractile at one half.
    pub fn median(&self) -> FuncResult<f64> {
        self.interpolated_fractile(0.5)
    }

    fn checked_total(&self, operation: &str) -> FuncResult<f64> {
        let total = self.sum_of_all_weights();
        if total == 0.0 {
            return Err(FuncError::config("sum of weights is zero")
                .with_context(self.error_context(operation)));
        }
        Ok(total)
    }

    fn cumulative(&self, total: f64) -> FuncResult<LightFixedXFunc> {
        let ys = self
            .samples
            .values()
            .iter()
            .scan(0.0, |sum, weight| {
                *sum += weight;
                Some(*sum / total)
            })
            .collect();
        let func = LightFixedXFunc::new(self.samples.xs().to_vec(), ys)?;
        Ok(func.with_metadata(self.metadata.clone()))
    }
}

fn check_fraction(fraction: f64) -> FuncResult<()> {
    if (0.0..=1.0).contains(&fraction) {
        Ok(())
    } else {
        Err(FuncError::domain(fraction, "fraction must be within [0, 1]"))
    }
}

impl DiscretizedFunc for EmpiricalDistribution {
    fn size(&self) -> usize {
        self.samples.len()
    }

    fn x(&self, index: usize) -> f64 {
        self.samples.xs()[index]
    }

    fn y(&self, index: usize) -> f64 {
        self.samples.ys()[index]
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        self.samples.binary_search(x).ok()
    }

    fn x_index_before(&self, x: f64) -> Option<usize> {
        self.samples.x_index_before(x)
    }

    fn tolerance(&self) -> f64 {
        self.samples.tolerance()
    }

    fn metadata(&self) -> &FuncMetadata {
        &self.metadata
    }
}

impl DiscretizedFuncMut for EmpiricalDistribution {
    /// Adds `y` to the weight of `x`; equivalent to [`EmpiricalDistribution::add`].
    fn set(&mut self, x: f64, y: f64) -> FuncResult<()> {
        self.add(x, y)
    }

    /// Replaces the weight at `index`.
    fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()> {
        self.samples.set_y(index, y)
    }

    fn set_tolerance(&mut self, _tolerance: f64) -> FuncResult<()> {
        Err(FuncError::unsupported("empirical distributions always use zero tolerance")
            .with_context(self.error_context("setting tolerance")))
    }

    fn set_metadata(&mut self, metadata: FuncMetadata) -> FuncResult<()> {
        self.metadata = metadata;
        Ok(())
    }
}

impl Container for EmpiricalDistribution {
    fn values(&self) -> &[f64] {
        self.samples.values()
    }
}

impl Validate for EmpiricalDistribution {
    fn validate(&self) -> ValidationResult {
        crate::function::validation::validate_samples(self.samples.xs(), self.samples.ys())
    }
}

/// Builds a normalized CDF from raw samples in one pass.
///
/// Samples are sorted by value; neighbours that are equal at single
/// precision are merged (the first value is kept, weights are summed).
/// Without `weights`, every sample weighs one.
///
/// Merging at single precision means the result can have fewer points than
/// an [`EmpiricalDistribution`] fed the same samples.
///
/// # Errors
/// An invalid-configuration error for empty input, for a weight count that
/// differs from the value count, or for weights summing to zero.
pub fn calc_quick_norm_cdf(
    values: &[f64],
    weights: Option<&[f64]>,
) -> FuncResult<LightFixedXFunc> {
    if values.is_empty() {
        return Err(FuncError::config("cannot build a CDF from no values"));
    }
    if let Some(weights) = weights {
        crate::validation_utils::validate_same_length(values, weights)
            .into_result("building quick CDF")?;
    }
    if let Some(value) = values.iter().find(|v| v.is_nan()) {
        return Err(FuncError::domain(*value, "CDF values cannot be NaN"));
    }

    let weight_of = |i: usize| weights.map_or(1.0, |w| w[i]);
    let sorted = values
        .iter()
        .enumerate()
        .map(|(i, &value)| (value, weight_of(i)))
        .sorted_by(|a, b| a.0.total_cmp(&b.0));

    let mut xs: Vec<f64> = Vec::with_capacity(values.len());
    let mut ys: Vec<f64> = Vec::with_capacity(values.len());
    for (value, weight) in sorted {
        match xs.last() {
            Some(&last) if last as f32 == value as f32 => {
                if let Some(sum) = ys.last_mut() {
                    *sum += weight;
                }
            }
            _ => {
                xs.push(value);
                ys.push(weight);
            }
        }
    }

    let merged = values.len() - xs.len();
    if merged > 0 {
        debug!(
            "quick CDF merged {} of {} values equal at single precision",
            merged,
            values.len()
        );
    }

    let mut running = 0.0;
    for y in ys.iter_mut() {
        running += *y;
        *y = running;
    }
    if running == 0.0 {
        return Err(FuncError::config("sum of weights is zero"));
    }
    ys.iter_mut().for_each(|y| *y /= running);

    LightFixedXFunc::new(xs, ys)
}

/// Reads the value at `fraction` from a normalized CDF.
///
/// A one-point CDF returns its only x. Otherwise the first point with
/// cumulative value `>= fraction` is found by binary search and the value is
/// interpolated linearly from its predecessor. Fractions at or below the
/// first CDF value give the first x, fractions beyond the last give the
/// last x.
///
/// # Errors
/// A domain-range error if `fraction` is outside `[0, 1]`, or an index error
/// for an empty CDF.
pub fn calc_fractile_from_norm_cdf(cdf: &LightFixedXFunc, fraction: f64) -> FuncResult<f64> {
    if cdf.is_empty() {
        return Err(FuncError::IndexOutOfBounds { index: 0, size: 0 });
    }
    check_fraction(fraction)?;

    let (xs, ys) = (cdf.xs(), cdf.ys());
    if xs.len() == 1 {
        return Ok(xs[0]);
    }

    let i = ys.partition_point(|&y| y < fraction);
    if i == 0 {
        return Ok(xs[0]);
    }
    if i == ys.len() {
        return Ok(xs[xs.len() - 1]);
    }
    if ys[i] == fraction {
        return Ok(xs[i]);
    }

    let (x1, x2, y1, y2) = (xs[i - 1], xs[i], ys[i - 1], ys[i]);
    Ok(((fraction - y1) * (x2 - x1)) / (y2 - y1) + x1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_samples() -> EmpiricalDistribution {
        EmpiricalDistribution::from_samples(&[2.0, 3.0, 4.0], &[1.0, 1.0, 1.0]).unwrap()
    }

    mod moment_tests {
        use super::*;

        #[test]
        fn test_mean_and_std_dev() {
            let dist = three_samples();
            assert_eq!(dist.mean(), 3.0);
            assert!((dist.std_dev() - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
            assert!((dist.cov() - 0.816496580927726 / 3.0).abs() < 1e-12);
        }

        #[test]
        fn test_repeated_values_sum_weights() {
            let mut dist = EmpiricalDistribution::new();
            dist.add(1.0, 0.5).unwrap();
            dist.add(1.0, 0.25).unwrap();
            dist.set(2.0, 1.0).unwrap();
            assert_eq!(dist.size(), 2);
            assert_eq!(dist.y(0), 0.75);
            assert_eq!(dist.sum_of_all_weights(), 1.75);
        }

        #[test]
        fn test_tolerance_is_fixed() {
            let mut dist = three_samples();
            assert!(matches!(
                dist.set_tolerance(0.1),
                Err(FuncError::UnsupportedMutation { .. })
            ));
            assert_eq!(dist.tolerance(), 0.0);
        }
    }

    mod cdf_tests {
        use super::*;

        #[test]
        fn test_normalized_cdf() {
            let dist = EmpiricalDistribution::from_samples(&[5.0, 1.0, 3.0], &[1.0, 2.0, 1.0]).unwrap();
            let cdf = dist.normalized_cumulative_distribution().unwrap();
            assert_eq!(cdf.xs(), &[1.0, 3.0, 5.0]);
            assert_eq!(cdf.ys(), &[0.5, 0.75, 1.0]);

            let raw = dist.cumulative_distribution().unwrap();
            assert_eq!(raw.ys(), &[2.0, 3.0, 4.0]);

            let normalized = dist.normalized_distribution().unwrap();
            assert_eq!(normalized.ys(), &[0.5, 0.25, 0.25]);
        }

        #[test]
        fn test_zero_total_is_rejected() {
            let dist = EmpiricalDistribution::from_samples(&[1.0], &[0.0]).unwrap();
            assert!(dist.normalized_cumulative_distribution().is_err());
        }

        #[test]
        fn test_fractiles() {
            let dist = three_samples();
            assert_eq!(dist.interpolated_fractile(0.1).unwrap(), 2.0);
            assert_eq!(dist.interpolated_fractile(1.0).unwrap(), 4.0);
            assert!((dist.interpolated_fractile(0.5).unwrap() - 2.5).abs() < 1e-12);
            assert_eq!(dist.median().unwrap(), dist.interpolated_fractile(0.5).unwrap());

            assert_eq!(dist.discrete_fractile(0.0).unwrap(), 2.0);
            assert_eq!(dist.discrete_fractile(0.5).unwrap(), 3.0);
            assert_eq!(dist.discrete_fractile(1.0).unwrap(), 4.0);

            assert!(dist.interpolated_fractile(1.5).unwrap_err().is_domain_range());
            assert!(dist.discrete_fractile(-0.1).unwrap_err().is_domain_range());
            assert!(dist.discrete_fractile(f64::NAN).is_err());
        }
    }

    mod mode_tests {
        use super::*;

        #[test]
        fn test_single_mode() {
            let dist = EmpiricalDistribution::from_samples(&[1.0, 2.0, 3.0], &[1.0, 5.0, 2.0]).unwrap();
            assert_eq!(dist.apparent_mode().unwrap(), 2.0);
            assert!(!dist.is_multi_modal());
        }

        #[test]
        fn test_adjacent_tie_gives_midpoint() {
            let dist = EmpiricalDistribution::from_samples(&[1.0, 2.0, 3.0], &[1.0, 5.0, 5.0]).unwrap();
            assert_eq!(dist.apparent_mode().unwrap(), 2.5);
            assert!(dist.is_multi_modal());
        }

        #[test]
        fn test_non_adjacent_tie_is_ambiguous() {
            let dist =
                EmpiricalDistribution::from_samples(&[1.0, 2.0, 3.0, 4.0], &[5.0, 1.0, 5.0, 2.0]).unwrap();
            assert!(matches!(
                dist.apparent_mode(),
                Err(FuncError::AmbiguousStatistic { .. })
            ));
            assert_eq!(dist.most_central_mode().unwrap(), 3.0);
        }

        #[test]
        fn test_empty_mode() {
            assert!(EmpiricalDistribution::new().apparent_mode().is_err());
            assert!(!EmpiricalDistribution::new().is_multi_modal());
        }
    }

    mod quick_cdf_tests {
        use super::*;

        #[test]
        fn test_equal_weights() {
            let cdf = calc_quick_norm_cdf(&[3.0, 1.0, 2.0, 4.0], None).unwrap();
            assert_eq!(cdf.xs(), &[1.0, 2.0, 3.0, 4.0]);
            assert_eq!(cdf.ys(), &[0.25, 0.5, 0.75, 1.0]);
        }

        #[test]
        fn test_merges_at_single_precision() {
            let values = [1.0, 1.0 + 1e-12, 2.0];
            let cdf = calc_quick_norm_cdf(&values, Some(&[1.0, 1.0, 2.0])).unwrap();
            assert_eq!(cdf.xs(), &[1.0, 2.0]);
            assert_eq!(cdf.ys(), &[0.5, 1.0]);

            // the incremental distribution keeps both values
            let dist = EmpiricalDistribution::from_samples(&values, &[1.0, 1.0, 2.0]).unwrap();
            assert_eq!(dist.size(), 3);
        }

        #[test]
        fn test_invalid_input() {
            assert!(calc_quick_norm_cdf(&[], None).is_err());
            assert!(calc_quick_norm_cdf(&[1.0, 2.0], Some(&[1.0])).is_err());
            assert!(calc_quick_norm_cdf(&[1.0, f64::NAN], None).is_err());
        }

        #[test]
        fn test_fractile_from_cdf() {
            let cdf = calc_quick_norm_cdf(&[1.0, 2.0, 3.0, 4.0], None).unwrap();
            assert_eq!(calc_fractile_from_norm_cdf(&cdf, 0.0).unwrap(), 1.0);
            assert_eq!(calc_fractile_from_norm_cdf(&cdf, 0.25).unwrap(), 1.0);
            assert_eq!(calc_fractile_from_norm_cdf(&cdf, 0.5).unwrap(), 2.0);
            assert_eq!(calc_fractile_from_norm_cdf(&cdf, 0.625).unwrap(), 2.5);
            assert_eq!(calc_fractile_from_norm_cdf(&cdf, 1.0).unwrap(), 4.0);
            assert!(calc_fractile_from_norm_cdf(&cdf, 1.1).is_err());

            let single = calc_quick_norm_cdf(&[7.0], None).unwrap();
            assert_eq!(calc_fractile_from_norm_cdf(&single, 0.3).unwrap(), 7.0);
        }

        #[test]
        fn test_matches_incremental_fractiles() {
            let values = [0.3, 1.7, 0.9, 2.2, 1.1];
            let weights = [0.1, 0.3, 0.2, 0.25, 0.15];
            let quick = calc_quick_norm_cdf(&values, Some(&weights)).unwrap();
            let dist = EmpiricalDistribution::from_samples(&values, &weights).unwrap();
            let incremental = dist.normalized_cumulative_distribution().unwrap();

            assert_eq!(quick.xs(), incremental.xs());
            for (a, b) in quick.ys().iter().zip(incremental.ys()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }
}
