//! Read-only view over any discretized function.

use std::ops::Deref;

use super::{DiscretizedFunc, DiscretizedFuncMut, FuncMetadata};
use crate::errors::{FuncError, FuncResult};

/// Wraps a function and rejects every write with an unsupported-mutation
/// error. Reads are forwarded unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmodifiableFunc<F> {
    inner: F,
}

impl<F: DiscretizedFunc> UnmodifiableFunc<F> {
    pub fn new(inner: F) -> Self {
        UnmodifiableFunc { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }

    fn reject<T>(&self, operation: &str) -> FuncResult<T> {
        Err(FuncError::unsupported("function is unmodifiable")
            .with_context(self.error_context(operation)))
    }
}

impl<F> Deref for UnmodifiableFunc<F> {
    type Target = F;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<F: DiscretizedFunc> DiscretizedFunc for UnmodifiableFunc<F> {
    fn size(&self) -> usize {
        self.inner.size()
    }

    fn x(&self, index: usize) -> f64 {
        self.inner.x(index)
    }

    fn y(&self, index: usize) -> f64 {
        self.inner.y(index)
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        self.inner.x_index(x)
    }

    fn x_index_before(&self, x: f64) -> Option<usize> {
        self.inner.x_index_before(x)
    }

    fn min_x(&self) -> FuncResult<f64> {
        self.inner.min_x()
    }

    fn max_x(&self) -> FuncResult<f64> {
        self.inner.max_x()
    }

    fn min_y(&self) -> FuncResult<f64> {
        self.inner.min_y()
    }

    fn max_y(&self) -> FuncResult<f64> {
        self.inner.max_y()
    }

    fn tolerance(&self) -> f64 {
        self.inner.tolerance()
    }

    fn metadata(&self) -> &FuncMetadata {
        self.inner.metadata()
    }
}

impl<F: DiscretizedFunc> DiscretizedFuncMut for UnmodifiableFunc<F> {
    fn set(&mut self, x: f64, _y: f64) -> FuncResult<()> {
        self.reject(&format!("setting x={}", x))
    }

    fn set_y(&mut self, index: usize, _y: f64) -> FuncResult<()> {
        self.reject(&format!("setting index {}", index))
    }

    fn set_tolerance(&mut self, _tolerance: f64) -> FuncResult<()> {
        self.reject("setting tolerance")
    }

    fn set_metadata(&mut self, _metadata: FuncMetadata) -> FuncResult<()> {
        self.reject("setting metadata")
    }
}
