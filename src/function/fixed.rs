//! Functions with a fixed x-domain stored as two parallel arrays.

use super::{DiscretizedFunc, DiscretizedFuncMut, FuncMetadata};
use crate::{
    containers::{
        Container, ContainerMut,
        sorted::{encode_search, tolerance_search},
    },
    core::Point,
    errors::{FuncError, FuncResult},
    types::{Validate, ValidationResult},
};

/// A lightweight function whose x-values never change after construction.
///
/// Lookups are exact binary searches (the tolerance is always zero). Values
/// can be updated by index, or by x when that x is already present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightFixedXFunc {
    xs: Vec<f64>,
    ys: Vec<f64>,
    pub metadata: FuncMetadata,
}

impl LightFixedXFunc {
    /// Wraps two parallel arrays.
    ///
    /// # Errors
    /// An invalid-configuration error if the lengths differ or `xs` is not
    /// strictly ascending.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> FuncResult<Self> {
        super::validation::validate_fixed_arrays(&xs, &ys)
            .into_result("building fixed-x function")?;
        Ok(LightFixedXFunc {
            xs,
            ys,
            metadata: FuncMetadata::default(),
        })
    }

    pub fn with_metadata(mut self, metadata: FuncMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Index of a point whose x and y both match exactly, or the signed
    /// insertion encoding of its x when absent. A matching x with a
    /// different y yields `-1`.
    pub fn index_of(&self, point: Point) -> isize {
        match self.search(point.x) {
            Ok(index) if self.ys[index] == point.y => index as isize,
            Ok(_) => -1,
            Err(insertion) => encode_search(Err(insertion)),
        }
    }

    fn search(&self, x: f64) -> Result<usize, usize> {
        tolerance_search(&self.xs, x, 0.0)
    }
}

impl DiscretizedFunc for LightFixedXFunc {
    fn size(&self) -> usize {
        self.xs.len()
    }

    fn x(&self, index: usize) -> f64 {
        self.xs[index]
    }

    fn y(&self, index: usize) -> f64 {
        self.ys[index]
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        self.search(x).ok()
    }

    fn x_index_before(&self, x: f64) -> Option<usize> {
        match self.search(x) {
            Ok(index) => index.checked_sub(1),
            Err(insertion) => insertion.checked_sub(1),
        }
    }

    fn tolerance(&self) -> f64 {
        0.0
    }

    fn metadata(&self) -> &FuncMetadata {
        &self.metadata
    }
}

impl DiscretizedFuncMut for LightFixedXFunc {
    /// Updates the value at an existing x. The domain cannot grow.
    fn set(&mut self, x: f64, y: f64) -> FuncResult<()> {
        match self.search(x) {
            Ok(index) => {
                self.ys[index] = y;
                Ok(())
            }
            Err(_) => Err(FuncError::unsupported(format!(
                "x={} is not in the fixed domain; points cannot be added",
                x
            ))
            .with_context(self.error_context("setting value"))),
        }
    }

    fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()> {
        let size = self.size();
        let slot = self
            .ys
            .get_mut(index)
            .ok_or(FuncError::IndexOutOfBounds { index, size })?;
        *slot = y;
        Ok(())
    }

    fn set_tolerance(&mut self, tolerance: f64) -> FuncResult<()> {
        if tolerance == 0.0 {
            return Ok(());
        }
        Err(FuncError::unsupported("fixed-x functions only support exact lookup")
            .with_context(self.error_context("setting tolerance")))
    }

    fn set_metadata(&mut self, metadata: FuncMetadata) -> FuncResult<()> {
        self.metadata = metadata;
        Ok(())
    }
}

impl Container for LightFixedXFunc {
    fn values(&self) -> &[f64] {
        &self.ys
    }
}

impl ContainerMut for LightFixedXFunc {
    fn values_mut(&mut self) -> &mut [f64] {
        &mut self.ys
    }
}

impl Validate for LightFixedXFunc {
    fn validate(&self) -> ValidationResult {
        super::validation::validate_sorted_points(&self.xs, &self.ys, 0.0)
    }
}
