//! # Discretized Functions
//!
//! A discretized function is an ordered, finite sequence of `(x, y)` points
//! approximating a continuous function. Several storage strategies share one
//! read-only capability, [`DiscretizedFunc`], and one write capability,
//! [`DiscretizedFuncMut`].
//!
//! ## Quick Start
//!
//! ```rust
//! use discretized_func::{ArbitrarilyDiscretizedFunc, DiscretizedFunc, DiscretizedFuncMut};
//!
//! let mut func = ArbitrarilyDiscretizedFunc::named("hazard curve");
//! func.set(0.1, 0.02).unwrap();
//! func.set(0.01, 0.5).unwrap();
//! func.set(1.0, 0.0001).unwrap();
//!
//! assert_eq!(func.size(), 3);
//! assert_eq!(func.x(0), 0.01);
//! assert_eq!(func.y_at(0.1).unwrap(), 0.02);
//! ```
//!
//! ## Storage Strategies
//!
//! - **Arbitrary**: tolerance-deduplicated sorted list, any spacing
//! - **Evenly**: only y-values stored, `x(i) = min_x + i * delta`
//! - **Fixed**: immutable x-domain in two parallel arrays, exact lookup
//! - **Unmodifiable**: read-only view over any of the above

pub mod arbitrary;
pub mod evenly;
pub mod fixed;
pub mod unmodifiable;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::{
    core::Point,
    errors::{ErrorContext, FuncError, FuncResult},
    io::FunctionRecord,
};

pub use arbitrary::ArbitrarilyDiscretizedFunc;
pub use evenly::EvenlyDiscretizedFunc;
pub use fixed::LightFixedXFunc;
pub use unmodifiable::UnmodifiableFunc;

/// Tolerance used by functions that are not given one.
pub const DEFAULT_TOLERANCE: f64 = 0.0;

/// Descriptive labels attached to a function.
///
/// Metadata takes part in equality but never in numeric behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncMetadata {
    pub name: String,
    pub info: String,
    pub x_axis_name: String,
    pub y_axis_name: String,
}

impl FuncMetadata {
    pub fn named<S: Into<String>>(name: S) -> Self {
        FuncMetadata {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Read access to a discretized function.
///
/// Points are observed in ascending x order through index access. Index
/// arguments must be in `[0, size())`; `x` and `y` panic otherwise, while
/// [`get`](DiscretizedFunc::get) reports an error.
pub trait DiscretizedFunc {
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The x-value at `index`.
    ///
    /// # Panics
    /// If `index >= size()`.
    fn x(&self, index: usize) -> f64;

    /// The y-value at `index`.
    ///
    /// # Panics
    /// If `index >= size()`.
    fn y(&self, index: usize) -> f64;

    /// The point at `index`, or an index-out-of-bounds error.
    fn get(&self, index: usize) -> FuncResult<Point> {
        if index >= self.size() {
            return Err(FuncError::IndexOutOfBounds {
                index,
                size: self.size(),
            });
        }
        Ok(Point::new(self.x(index), self.y(index)))
    }

    /// Index of the point whose x matches within the function's tolerance.
    fn x_index(&self, x: f64) -> Option<usize>;

    /// Index `i` of the segment containing `x`, i.e. `x(i) < x < x(i+1)`.
    ///
    /// `None` means `x` lies below the first point. When `x` matches a stored
    /// x-value the strategies differ: sorted storage (arbitrary, fixed,
    /// empirical) returns the segment ending at that point, `i - 1`, and
    /// `None` for the first point; evenly spaced storage returns the segment
    /// starting there, `i`, clamped to the last index. Interpolation gives
    /// the same value either way. Used to locate interpolation segments.
    fn x_index_before(&self, x: f64) -> Option<usize>;

    /// The y-value stored for `x`.
    ///
    /// # Errors
    /// A domain-range error if no point matches `x` within tolerance.
    fn y_at(&self, x: f64) -> FuncResult<f64> {
        match self.x_index(x) {
            Some(index) => Ok(self.y(index)),
            None => Err(FuncError::domain(x, "no point matches x within tolerance")
                .with_context(self.error_context("looking up y"))),
        }
    }

    fn min_x(&self) -> FuncResult<f64> {
        self.get(0).map(|p| p.x)
    }

    fn max_x(&self) -> FuncResult<f64> {
        self.get(self.size().saturating_sub(1)).map(|p| p.x)
    }

    /// Smallest y-value. NaN values are skipped unless every value is NaN.
    fn min_y(&self) -> FuncResult<f64> {
        self.get(0)?;
        Ok((0..self.size())
            .map(|i| self.y(i))
            .fold(f64::INFINITY, f64::min))
    }

    /// Largest y-value. NaN values are skipped unless every value is NaN.
    fn max_y(&self) -> FuncResult<f64> {
        self.get(0)?;
        Ok((0..self.size())
            .map(|i| self.y(i))
            .fold(f64::NEG_INFINITY, f64::max))
    }

    fn tolerance(&self) -> f64;

    fn metadata(&self) -> &FuncMetadata;

    fn name(&self) -> &str {
        &self.metadata().name
    }

    fn info(&self) -> &str {
        &self.metadata().info
    }

    fn x_axis_name(&self) -> &str {
        &self.metadata().x_axis_name
    }

    fn y_axis_name(&self) -> &str {
        &self.metadata().y_axis_name
    }

    fn has_x(&self, x: f64) -> bool {
        self.x_index(x).is_some()
    }

    fn sum_of_y(&self) -> f64 {
        (0..self.size()).map(|i| self.y(i)).sum()
    }

    fn x_values(&self) -> Vec<f64> {
        (0..self.size()).map(|i| self.x(i)).collect()
    }

    fn y_values(&self) -> Vec<f64> {
        (0..self.size()).map(|i| self.y(i)).collect()
    }

    /// Iterates over copies of the points in ascending x order.
    fn points(&self) -> impl Iterator<Item = Point> + '_
    where
        Self: Sized,
    {
        (0..self.size()).map(move |i| Point::new(self.x(i), self.y(i)))
    }

    /// One `x\ty` line per point, values printed at single precision.
    fn metadata_string(&self) -> String {
        (0..self.size())
            .map(|i| format!("{}\t{}\n", self.x(i) as f32, self.y(i) as f32))
            .collect()
    }

    /// Exports the function as a serializable record.
    fn to_record(&self) -> FunctionRecord
    where
        Self: Sized,
    {
        FunctionRecord::from_func(self)
    }

    /// Error context naming this function.
    fn error_context(&self, operation: &str) -> ErrorContext {
        ErrorContext::with_function(self.name()).with_operation(operation)
    }
}

/// Write access to a discretized function.
///
/// Every mutator validates its input first; a failed call leaves the
/// function unchanged.
pub trait DiscretizedFuncMut: DiscretizedFunc {
    /// Sets the value at `x`. Whether new x-values may be added depends on the
    /// storage strategy.
    fn set(&mut self, x: f64, y: f64) -> FuncResult<()>;

    fn set_point(&mut self, point: Point) -> FuncResult<()> {
        self.set(point.x, point.y)
    }

    /// Replaces the value at `index`.
    fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()>;

    fn set_tolerance(&mut self, tolerance: f64) -> FuncResult<()>;

    fn set_metadata(&mut self, metadata: FuncMetadata) -> FuncResult<()>;

    fn set_name(&mut self, name: &str) -> FuncResult<()> {
        let mut metadata = self.metadata().clone();
        metadata.name = name.to_string();
        self.set_metadata(metadata)
    }

    /// Sets every point in order. Either all points are applied or, on the
    /// first failure, none are.
    fn set_all<I>(&mut self, points: I) -> FuncResult<()>
    where
        Self: Sized + Clone,
        I: IntoIterator<Item = Point>,
    {
        let mut staged = self.clone();
        for point in points {
            staged.set_point(point)?;
        }
        *self = staged;
        Ok(())
    }

    /// Multiplies every y-value by `factor`.
    fn scale(&mut self, factor: f64) -> FuncResult<()> {
        for i in 0..self.size() {
            let y = self.y(i);
            self.set_y(i, y * factor)?;
        }
        Ok(())
    }
}
