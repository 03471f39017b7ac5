//! Export and reconstruction of discretized functions.
//!
//! [`FunctionRecord`] is a plain serde-friendly snapshot of any function.
//! The [`text`] module reads and writes the two-column `x y` format.

pub mod text;

use serde::{Deserialize, Serialize};

use crate::{
    core::Point,
    errors::FuncResult,
    function::{ArbitrarilyDiscretizedFunc, DiscretizedFunc, FuncMetadata},
};

/// Snapshot of a function's metadata, tolerance and points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub metadata: FuncMetadata,
    pub tolerance: f64,
    pub points: Vec<Point>,
}

impl FunctionRecord {
    pub fn from_func<F: DiscretizedFunc + ?Sized>(func: &F) -> Self {
        FunctionRecord {
            metadata: func.metadata().clone(),
            tolerance: func.tolerance(),
            points: (0..func.size())
                .map(|i| Point::new(func.x(i), func.y(i)))
                .collect(),
        }
    }

    /// Rebuilds the record as an arbitrarily spaced function.
    ///
    /// # Errors
    /// An invalid-configuration error for a negative tolerance, or a
    /// domain-range error for a NaN x.
    pub fn into_arbitrary(self) -> FuncResult<ArbitrarilyDiscretizedFunc> {
        ArbitrarilyDiscretizedFunc::from_points(self.metadata, self.tolerance, self.points)
    }
}
