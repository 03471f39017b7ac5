//! Evenly spaced functions storing only their y-values.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use super::{DiscretizedFunc, DiscretizedFuncMut, FuncMetadata, DEFAULT_TOLERANCE};
use crate::{
    containers::{Container, ContainerMut},
    errors::{FuncError, FuncResult},
    types::{Validate, ValidationResult},
    validation_utils::{_chain, _return, validate_tolerance, warn_non_finite},
};

/// Scale applied before rounding in [`EvenlyDiscretizedFunc::closest_x_index`]
/// so that x-values sitting exactly on a half-bin boundary after a lossy
/// division still round up.
pub const PRECISION_SCALE: f64 = 1.0 + 1e-14;

/// A function over the grid `x(i) = min_x + i * delta`, `i` in `[0, size)`.
///
/// The grid is fixed at construction; only y-values can change. New
/// functions start with every y set to zero.
///
/// # Examples
///
/// ```rust
/// use discretized_func::{DiscretizedFunc, EvenlyDiscretizedFunc};
///
/// let func = EvenlyDiscretizedFunc::new(5.0, 11, 0.1).unwrap();
/// assert_eq!(func.size(), 11);
/// assert!((func.max_x().unwrap() - 6.0).abs() < 1e-12);
/// assert_eq!(func.closest_x_index(5.26), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EvenlyDiscretizedFunc {
    min_x: f64,
    max_x: f64,
    delta: f64,
    values: Vec<f64>,
    tolerance: f64,
    pub metadata: FuncMetadata,
}

impl EvenlyDiscretizedFunc {
    /// Builds the grid from its first x, number of points and spacing.
    ///
    /// # Errors
    /// An invalid-configuration error if `num` is zero or the derived bounds
    /// are inconsistent.
    pub fn new(min_x: f64, num: usize, delta: f64) -> FuncResult<Self> {
        if num == 0 {
            return Err(FuncError::config("num points must be > 0"));
        }
        let mut func = Self::from_range(min_x, min_x + (num - 1) as f64 * delta, num)?;
        if num > 1 {
            func.delta = delta;
        }
        Ok(func)
    }

    /// Builds the grid from its bounds and number of points.
    ///
    /// # Errors
    /// An invalid-configuration error when `num == 0`, when `num == 1` but
    /// the bounds differ, when `min_x > max_x`, or when the bounds are
    /// equal but `num > 1`.
    pub fn from_range(min_x: f64, max_x: f64, num: usize) -> FuncResult<Self> {
        super::validation::validate_grid(min_x, max_x, num)
            .into_result("building evenly spaced grid")?;

        let delta = if num > 1 {
            (max_x - min_x) / (num - 1) as f64
        } else {
            0.0
        };

        Ok(EvenlyDiscretizedFunc {
            min_x,
            max_x,
            delta,
            values: vec![0.0; num],
            tolerance: DEFAULT_TOLERANCE,
            metadata: FuncMetadata::default(),
        })
    }

    /// Spacing between consecutive x-values; zero for a single point.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Index of the grid point nearest to `x`, clamped to the grid.
    pub fn closest_x_index(&self, x: f64) -> usize {
        if self.delta == 0.0 {
            return 0;
        }

        let scaled = PRECISION_SCALE * (x - self.min_x) / self.delta;
        let rounded = (scaled + 0.5).floor();
        if !(rounded > 0.0) {
            return 0;
        }
        (rounded as usize).min(self.values.len() - 1)
    }

    /// Accumulates `y` into the bin matching `x`.
    ///
    /// # Errors
    /// A domain-range error if `x` is not on the grid within tolerance.
    pub fn add(&mut self, x: f64, y: f64) -> FuncResult<()> {
        let index = self.grid_index(x, "adding to bin")?;
        self.values[index] += y;
        Ok(())
    }

    /// Accumulates `y` into the bin at `index`.
    pub fn add_at(&mut self, index: usize, y: f64) -> FuncResult<()> {
        let size = self.size();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(FuncError::IndexOutOfBounds { index, size })?;
        *slot += y;
        Ok(())
    }

    /// Resets every y-value to NaN; the grid is unchanged.
    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|y| *y = f64::NAN);
    }

    /// Index of the first occurrence of the largest y-value.
    pub fn x_index_for_max_y(&self) -> usize {
        let mut best = 0;
        for (i, &y) in self.values.iter().enumerate() {
            if y > self.values[best] {
                best = i;
            }
        }
        best
    }

    /// The y-value of the grid point nearest to `x`. Halfway between two
    /// points the upper one wins; outside the grid the end values are used.
    pub fn closest_y_to_x(&self, x: f64) -> f64 {
        if self.delta == 0.0 || x <= self.min_x {
            return self.values[0];
        }
        if x >= self.max_x {
            return self.values[self.values.len() - 1];
        }

        let lower = ((x - self.min_x) / self.delta).floor() as usize;
        let lower = lower.min(self.values.len() - 1);
        let upper = (lower + 1).min(self.values.len() - 1);
        if x - self.x(lower) < self.x(upper) - x {
            self.values[lower]
        } else {
            self.values[upper]
        }
    }

    /// True if both functions sit on the same grid.
    pub fn equal_x_values(&self, other: &EvenlyDiscretizedFunc) -> bool {
        self.min_x == other.min_x && self.delta == other.delta && self.size() == other.size()
    }

    /// True if both functions share a grid and every y-value (NaN equal to NaN).
    pub fn equal_x_and_y_values(&self, other: &EvenlyDiscretizedFunc) -> bool {
        self.equal_x_values(other)
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }

    /// True if every x-value is within `tolerance` of an integer.
    pub fn are_all_x_values_integer(&self, tolerance: f64) -> bool {
        (0..self.size()).all(|i| {
            let x = self.x(i);
            (x - x.round()).abs() <= tolerance
        })
    }

    fn grid_index(&self, x: f64, operation: &str) -> FuncResult<usize> {
        self.x_index(x).ok_or_else(|| {
            FuncError::domain(
                x,
                format!(
                    "x is not on the grid [{}, {}] with spacing {}",
                    self.min_x, self.max_x, self.delta
                ),
            )
            .with_context(self.error_context(operation))
        })
    }
}

/// Segment index for an evenly spaced grid: `floor((x - min_x) / delta)`,
/// clamped to the last point. `None` below the grid.
pub(crate) fn evenly_index_before(min_x: f64, delta: f64, size: usize, x: f64) -> Option<usize> {
    if delta == 0.0 {
        return if x < min_x { None } else { Some(0) };
    }

    let index = ((x - min_x) / delta).floor();
    if !(index >= 0.0) {
        return None;
    }
    Some((index as usize).min(size.saturating_sub(1)))
}

impl DiscretizedFunc for EvenlyDiscretizedFunc {
    fn size(&self) -> usize {
        self.values.len()
    }

    fn x(&self, index: usize) -> f64 {
        assert!(
            index < self.values.len(),
            "index {} out of bounds for size {}",
            index,
            self.values.len()
        );
        self.min_x + index as f64 * self.delta
    }

    fn y(&self, index: usize) -> f64 {
        self.values[index]
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        let index = self.closest_x_index(x);
        ((self.x(index) - x).abs() <= self.tolerance).then_some(index)
    }

    fn x_index_before(&self, x: f64) -> Option<usize> {
        evenly_index_before(self.min_x, self.delta, self.size(), x)
    }

    fn min_x(&self) -> FuncResult<f64> {
        Ok(self.min_x)
    }

    fn max_x(&self) -> FuncResult<f64> {
        Ok(self.max_x)
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn metadata(&self) -> &FuncMetadata {
        &self.metadata
    }
}

impl DiscretizedFuncMut for EvenlyDiscretizedFunc {
    /// Overwrites the value at the grid point matching `x`.
    fn set(&mut self, x: f64, y: f64) -> FuncResult<()> {
        let index = self.grid_index(x, "setting value")?;
        self.values[index] = y;
        Ok(())
    }

    fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()> {
        let size = self.size();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(FuncError::IndexOutOfBounds { index, size })?;
        *slot = y;
        Ok(())
    }

    fn set_tolerance(&mut self, tolerance: f64) -> FuncResult<()> {
        validate_tolerance(tolerance).into_result("setting tolerance")?;
        self.tolerance = tolerance;
        Ok(())
    }

    fn set_metadata(&mut self, metadata: FuncMetadata) -> FuncResult<()> {
        self.metadata = metadata;
        Ok(())
    }
}

impl Index<usize> for EvenlyDiscretizedFunc {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl IndexMut<usize> for EvenlyDiscretizedFunc {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

impl Container for EvenlyDiscretizedFunc {
    fn values(&self) -> &[f64] {
        &self.values
    }
}

impl ContainerMut for EvenlyDiscretizedFunc {
    fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl Validate for EvenlyDiscretizedFunc {
    fn validate(&self) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        let w = &mut warnings;
        let e = &mut errors;

        _chain(
            super::validation::validate_grid(self.min_x, self.max_x, self.size()),
            w,
            e,
        );
        _chain(validate_tolerance(self.tolerance), w, e);
        _chain(warn_non_finite(&self.values), w, e);
        _return(warnings, errors)
    }
}

impl fmt::Display for EvenlyDiscretizedFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.metadata.name)?;
        writeln!(f, "Num Points: {}", self.size())?;
        writeln!(f, "Min X: {}", self.min_x)?;
        writeln!(f, "Max X: {}", self.max_x)?;
        writeln!(f, "Delta: {}", self.delta)?;
        writeln!(f, "Info: {}", self.metadata.info)?;
        writeln!(f)?;
        writeln!(f, "X, Y Data:")?;
        write!(f, "{}", self.metadata_string())
    }
}
