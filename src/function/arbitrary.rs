//! Arbitrarily spaced functions backed by a [`ToleranceSortedList`].

use std::fmt;

use super::{DiscretizedFunc, DiscretizedFuncMut, FuncMetadata};
use crate::{
    containers::{Container, ContainerMut, Insertion, MergePolicy, ToleranceSortedList},
    core::Point,
    errors::{FuncError, FuncResult},
    types::{Validate, ValidationResult},
};

/// A function whose points may be spaced arbitrarily.
///
/// Setting a point whose x lies within `tolerance` of an existing point
/// overwrites that point's value; otherwise the point is inserted in order.
///
/// # Examples
///
/// ```rust
/// use discretized_func::{ArbitrarilyDiscretizedFunc, DiscretizedFunc, DiscretizedFuncMut};
///
/// let mut func = ArbitrarilyDiscretizedFunc::with_tolerance(0.01).unwrap();
/// func.set(1.0, 10.0).unwrap();
/// func.set(1.005, 20.0).unwrap();
/// assert_eq!(func.size(), 1);
/// assert_eq!(func.y(0), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArbitrarilyDiscretizedFunc {
    points: ToleranceSortedList,
    pub metadata: FuncMetadata,
}

impl ArbitrarilyDiscretizedFunc {
    /// An empty function with the default (zero) tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty function with the given name.
    pub fn named<S: Into<String>>(name: S) -> Self {
        ArbitrarilyDiscretizedFunc {
            points: ToleranceSortedList::default(),
            metadata: FuncMetadata::named(name),
        }
    }

    /// An empty function with a custom tolerance.
    ///
    /// # Errors
    /// An invalid-configuration error if `tolerance` is negative or NaN.
    pub fn with_tolerance(tolerance: f64) -> FuncResult<Self> {
        Ok(ArbitrarilyDiscretizedFunc {
            points: ToleranceSortedList::new(tolerance, MergePolicy::Replace)?,
            metadata: FuncMetadata::default(),
        })
    }

    /// Rebuilds a function from metadata, tolerance and a point sequence.
    /// Points need not be sorted; duplicates (within tolerance) keep the
    /// last value.
    pub fn from_points<I>(metadata: FuncMetadata, tolerance: f64, points: I) -> FuncResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut func = Self::with_tolerance(tolerance)?;
        func.metadata = metadata;
        for point in points {
            func.insert(point)?;
        }
        Ok(func)
    }

    /// Copies every point, the metadata and the tolerance of another function.
    pub fn from_func<F: DiscretizedFunc + ?Sized>(other: &F) -> FuncResult<Self> {
        Self::from_points(
            other.metadata().clone(),
            other.tolerance(),
            (0..other.size()).map(|i| Point::new(other.x(i), other.y(i))),
        )
    }

    /// Builds a function whose x-values are this function's y-values and
    /// whose y-values are `other`'s y-values, index by index.
    ///
    /// # Errors
    /// A domain-range error if the two functions differ in size.
    pub fn yy_function<F: DiscretizedFunc + ?Sized>(&self, other: &F) -> FuncResult<Self> {
        if self.size() != other.size() {
            return Err(FuncError::domain(
                other.size() as f64,
                format!(
                    "functions must have the same size ({} vs {})",
                    self.size(),
                    other.size()
                ),
            )
            .with_context(self.error_context("building yy function")));
        }

        let mut func = Self::new();
        for i in 0..self.size() {
            func.insert(Point::new(self.y(i), other.y(i)))?;
        }
        Ok(func)
    }

    /// Inserts or replaces a point and reports which happened.
    pub fn insert(&mut self, point: Point) -> FuncResult<Insertion> {
        self.points.add(point)
    }

    /// Removes the point at `index`.
    pub fn remove(&mut self, index: usize) -> FuncResult<Point> {
        self.points.remove(index)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Signed lookup: the index of `x`, or `-(insertion_point) - 1`.
    pub fn index_of(&self, x: f64) -> isize {
        self.points.index_of(x)
    }
}

impl DiscretizedFunc for ArbitrarilyDiscretizedFunc {
    fn size(&self) -> usize {
        self.points.len()
    }

    fn x(&self, index: usize) -> f64 {
        self.points.xs()[index]
    }

    fn y(&self, index: usize) -> f64 {
        self.points.ys()[index]
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        self.points.binary_search(x).ok()
    }

    fn x_index_before(&self, x: f64) -> Option<usize> {
        self.points.x_index_before(x)
    }

    fn min_y(&self) -> FuncResult<f64> {
        self.points
            .min_y()
            .ok_or(FuncError::IndexOutOfBounds { index: 0, size: 0 })
    }

    fn max_y(&self) -> FuncResult<f64> {
        self.points
            .max_y()
            .ok_or(FuncError::IndexOutOfBounds { index: 0, size: 0 })
    }

    fn tolerance(&self) -> f64 {
        self.points.tolerance()
    }

    fn metadata(&self) -> &FuncMetadata {
        &self.metadata
    }
}

impl DiscretizedFuncMut for ArbitrarilyDiscretizedFunc {
    fn set(&mut self, x: f64, y: f64) -> FuncResult<()> {
        self.insert(Point::new(x, y)).map(|_| ())
    }

    fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()> {
        self.points.set_y(index, y)
    }

    fn set_tolerance(&mut self, tolerance: f64) -> FuncResult<()> {
        self.points.set_tolerance(tolerance)
    }

    fn set_metadata(&mut self, metadata: FuncMetadata) -> FuncResult<()> {
        self.metadata = metadata;
        Ok(())
    }
}

impl Container for ArbitrarilyDiscretizedFunc {
    fn values(&self) -> &[f64] {
        self.points.values()
    }
}

impl ContainerMut for ArbitrarilyDiscretizedFunc {
    fn values_mut(&mut self) -> &mut [f64] {
        self.points.values_mut()
    }
}

impl Validate for ArbitrarilyDiscretizedFunc {
    fn validate(&self) -> ValidationResult {
        self.points.validate()
    }
}

impl fmt::Display for ArbitrarilyDiscretizedFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.metadata.name)?;
        writeln!(f, "Num Points: {}", self.size())?;
        writeln!(f, "Info: {}", self.metadata.info)?;
        writeln!(f)?;
        writeln!(f, "X, Y Data:")?;
        write!(f, "{}", self.metadata_string())
    }
}
