//! Weighted random selection of integer indices.

use std::sync::OnceLock;

use itertools::Itertools;
use log::{debug, warn};
use rand::Rng;

use crate::{
    containers::Container,
    errors::{FuncError, FuncResult},
    function::{DiscretizedFunc, DiscretizedFuncMut, EvenlyDiscretizedFunc, FuncMetadata},
    types::{Validate, ValidationResult},
};

/// Normalized running sum of the weights, rebuilt on demand.
#[derive(Debug, Clone, PartialEq)]
struct CumulativeCache {
    values: Vec<f64>,
    has_nan: bool,
}

/// Draws integers in `[0, n)` with probability proportional to their weight.
///
/// Weights live in an [`EvenlyDiscretizedFunc`] over `0, 1, ..., n - 1`.
/// The normalized cumulative distribution is computed on the first draw
/// after any change and reused until the next change. Sampling is a binary
/// search over that distribution.
///
/// # Examples
///
/// ```rust
/// use discretized_func::IntegerPdfSampler;
///
/// let sampler = IntegerPdfSampler::from_weights(&[1.0, 3.0]).unwrap();
/// assert_eq!(sampler.get_int(0.2).unwrap(), 0);
/// assert_eq!(sampler.get_int(0.25).unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct IntegerPdfSampler {
    weights: EvenlyDiscretizedFunc,
    cache: OnceLock<CumulativeCache>,
}

impl IntegerPdfSampler {
    /// A sampler over `n` integers, all with weight zero.
    ///
    /// # Errors
    /// An invalid-configuration error if `n` is zero.
    pub fn new(n: usize) -> FuncResult<Self> {
        Ok(IntegerPdfSampler {
            weights: EvenlyDiscretizedFunc::new(0.0, n, 1.0)?,
            cache: OnceLock::new(),
        })
    }

    /// A sampler with one integer per weight.
    pub fn from_weights(weights: &[f64]) -> FuncResult<Self> {
        let mut sampler = Self::new(weights.len())?;
        for (i, &weight) in weights.iter().enumerate() {
            sampler.weights.set_y(i, weight)?;
        }
        Ok(sampler)
    }

    /// Adds `weight` to the integer matching `x`.
    ///
    /// # Errors
    /// A domain-range error if `x` is not one of the integers.
    pub fn add(&mut self, x: f64, weight: f64) -> FuncResult<()> {
        self.weights.add(x, weight)?;
        self.invalidate();
        Ok(())
    }

    /// Adds `weight` to the integer at `index`.
    pub fn add_at(&mut self, index: usize, weight: f64) -> FuncResult<()> {
        self.weights.add_at(index, weight)?;
        self.invalidate();
        Ok(())
    }

    pub fn sum_of_y_vals(&self) -> f64 {
        self.weights.sum_of_y()
    }

    /// The normalized cumulative distribution over the integers.
    pub fn cumulative_distribution(&self) -> FuncResult<EvenlyDiscretizedFunc> {
        let mut func = EvenlyDiscretizedFunc::new(0.0, self.size(), 1.0)?;
        for (i, &value) in self.cumulative().values.iter().enumerate() {
            func.set_y(i, value)?;
        }
        Ok(func)
    }

    /// The first integer whose cumulative probability exceeds `probability`.
    ///
    /// # Errors
    /// A domain-range error if `probability` is negative or NaN, or if no
    /// cumulative value exceeds it (e.g. `probability >= 1`, or NaN
    /// weights).
    pub fn get_int(&self, probability: f64) -> FuncResult<usize> {
        if !(probability >= 0.0) {
            return Err(FuncError::domain(probability, "probability must be >= 0")
                .with_context(self.error_context("sampling")));
        }

        let cache = self.cumulative();
        // NaN cumulative values never exceed the probability
        let index = cache.values.partition_point(|&c| !(c > probability));
        if index >= cache.values.len() {
            let detail = if cache.has_nan {
                "NaN weights were detected"
            } else {
                "no NaN weights were detected"
            };
            return Err(FuncError::domain(
                probability,
                format!(
                    "no cumulative value exceeds the probability ({} of {} integers; {})",
                    index,
                    cache.values.len(),
                    detail
                ),
            )
            .with_context(self.error_context("sampling")));
        }
        Ok(index)
    }

    /// Draws an integer using the thread-local generator.
    pub fn get_random_int(&self) -> FuncResult<usize> {
        self.get_random_int_with(&mut rand::thread_rng())
    }

    /// Draws an integer using the given generator.
    pub fn get_random_int_with<R: Rng + ?Sized>(&self, rng: &mut R) -> FuncResult<usize> {
        self.get_int(rng.gen_range(0.0..1.0))
    }

    /// Integers sorted by descending weight, taken until their combined
    /// weight reaches `fraction` of the total.
    pub fn ordered_indices_of_highest_x_fract(&self, fraction: f64) -> FuncResult<Vec<usize>> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(FuncError::domain(fraction, "fraction must be within [0, 1]")
                .with_context(self.error_context("ranking weights")));
        }

        let values = self.weights.values();
        let target = fraction * self.sum_of_y_vals();
        let mut sum = 0.0;
        let mut indices = Vec::new();
        for index in (0..values.len()).sorted_by(|&a, &b| values[b].total_cmp(&values[a])) {
            if sum >= target {
                break;
            }
            indices.push(index);
            sum += values[index];
        }
        Ok(indices)
    }

    fn cumulative(&self) -> &CumulativeCache {
        self.cache.get_or_init(|| {
            let values = self.weights.values();
            let has_nan = values.iter().any(|v| v.is_nan());
            let total: f64 = values.iter().sum();

            let mut running = 0.0;
            let cumulative: Vec<f64> = values
                .iter()
                .map(|v| {
                    running += v;
                    running / total
                })
                .collect();

            debug!(
                "rebuilt cumulative distribution for {} integers (total weight {})",
                values.len(),
                total
            );
            if has_nan {
                warn!("sampler weights contain NaN values");
            } else if total == 0.0 {
                warn!("sampler weights sum to zero");
            }

            CumulativeCache {
                values: cumulative,
                has_nan,
            }
        })
    }

    fn invalidate(&mut self) {
        self.cache = OnceLock::new();
    }
}

impl PartialEq for IntegerPdfSampler {
    fn eq(&self, other: &Self) -> bool {
        self.weights == other.weights
    }
}

impl DiscretizedFunc for IntegerPdfSampler {
    fn size(&self) -> usize {
        self.weights.size()
    }

    fn x(&self, index: usize) -> f64 {
        self.weights.x(index)
    }

    fn y(&self, index: usize) -> f64 {
        self.weights.y(index)
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        self.weights.x_index(x)
    }

    fn x_index_before(&self, x: f64) -> Option<usize> {
        self.weights.x_index_before(x)
    }

    fn min_x(&self) -> FuncResult<f64> {
        self.weights.min_x()
    }

    fn max_x(&self) -> FuncResult<f64> {
        self.weights.max_x()
    }

    fn tolerance(&self) -> f64 {
        self.weights.tolerance()
    }

    fn metadata(&self) -> &FuncMetadata {
        self.weights.metadata()
    }
}

impl DiscretizedFuncMut for IntegerPdfSampler {
    fn set(&mut self, x: f64, y: f64) -> FuncResult<()> {
        self.weights.set(x, y)?;
        self.invalidate();
        Ok(())
    }

    fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()> {
        self.weights.set_y(index, y)?;
        self.invalidate();
        Ok(())
    }

    fn set_tolerance(&mut self, tolerance: f64) -> FuncResult<()> {
        self.weights.set_tolerance(tolerance)
    }

    fn set_metadata(&mut self, metadata: FuncMetadata) -> FuncResult<()> {
        self.weights.set_metadata(metadata)
    }
}

impl Container for IntegerPdfSampler {
    fn values(&self) -> &[f64] {
        self.weights.values()
    }
}

impl Validate for IntegerPdfSampler {
    fn validate(&self) -> ValidationResult {
        self.weights.validate()
    }
}
