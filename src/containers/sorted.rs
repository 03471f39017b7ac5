//! Sorted point list that treats x-values within a tolerance as equal.
//!
//! This is the storage behind arbitrarily discretized functions and the
//! empirical distribution. Points are kept in two parallel vectors sorted by
//! x. Inserting an x that matches an existing point (within tolerance)
//! either replaces or sums the stored value, depending on the
//! [`MergePolicy`].

use std::cmp::Ordering;

use log::trace;

use super::{Container, ContainerMut};
use crate::{
    core::Point,
    errors::{FuncError, FuncResult},
    types::Validate,
};

/// What happens when an inserted x matches an existing point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// The stored value is overwritten.
    #[default]
    Replace,
    /// The inserted value is added to the stored value.
    Sum,
}

/// Outcome of [`ToleranceSortedList::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new entry was created at this index.
    Inserted(usize),
    /// An existing entry at this index absorbed the value.
    Merged(usize),
}

impl Insertion {
    /// Returns true if the insert created a new entry.
    pub fn is_new(&self) -> bool {
        matches!(self, Insertion::Inserted(_))
    }

    /// Index of the affected entry.
    pub fn index(&self) -> usize {
        match *self {
            Insertion::Inserted(index) | Insertion::Merged(index) => index,
        }
    }
}

/// Compares a stored x against a query x, treating `|a - b| <= tolerance` as
/// equal. NaN queries compare greater than everything.
pub(crate) fn tolerance_cmp(stored: f64, query: f64, tolerance: f64) -> Ordering {
    if (stored - query).abs() <= tolerance {
        Ordering::Equal
    } else if stored < query {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Binary search over ascending `xs` with the tolerance comparator.
///
/// Returns `Ok(index)` for a match and `Err(insertion_point)` otherwise.
pub(crate) fn tolerance_search(xs: &[f64], x: f64, tolerance: f64) -> Result<usize, usize> {
    xs.binary_search_by(|probe| tolerance_cmp(*probe, x, tolerance))
}

/// Encodes a binary search result the conventional way: the index for a
/// match, `-(insertion_point) - 1` otherwise.
pub(crate) fn encode_search(result: Result<usize, usize>) -> isize {
    match result {
        Ok(index) => index as isize,
        Err(insertion) => -(insertion as isize) - 1,
    }
}

/// Points sorted by x, deduplicated within a tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceSortedList {
    xs: Vec<f64>,
    ys: Vec<f64>,
    tolerance: f64,
    policy: MergePolicy,
}

impl Default for ToleranceSortedList {
    fn default() -> Self {
        ToleranceSortedList {
            xs: Vec::new(),
            ys: Vec::new(),
            tolerance: 0.0,
            policy: MergePolicy::Replace,
        }
    }
}

impl ToleranceSortedList {
    /// Creates an empty list.
    ///
    /// # Errors
    /// Returns an invalid-configuration error if `tolerance` is negative or NaN.
    pub fn new(tolerance: f64, policy: MergePolicy) -> FuncResult<Self> {
        check_tolerance(tolerance)?;
        Ok(ToleranceSortedList {
            xs: Vec::new(),
            ys: Vec::new(),
            tolerance,
            policy,
        })
    }

    /// An empty list with zero tolerance, which needs no validation.
    pub fn exact(policy: MergePolicy) -> Self {
        ToleranceSortedList {
            policy,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Changes the tolerance used by future inserts and lookups. Points that
    /// are already stored are not merged retroactively.
    pub fn set_tolerance(&mut self, tolerance: f64) -> FuncResult<()> {
        check_tolerance(tolerance)?;
        self.tolerance = tolerance;
        Ok(())
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        Some(Point::new(*self.xs.get(index)?, self.ys[index]))
    }

    /// Binary search for `x` within tolerance.
    pub fn binary_search(&self, x: f64) -> Result<usize, usize> {
        tolerance_search(&self.xs, x, self.tolerance)
    }

    /// Index of the point matching `x`, or `-(insertion_point) - 1`.
    pub fn index_of(&self, x: f64) -> isize {
        encode_search(self.binary_search(x))
    }

    /// Inserts a point or merges it into the matching one.
    ///
    /// # Errors
    /// Returns a domain-range error for a NaN x; the list is left unchanged.
    pub fn add(&mut self, point: Point) -> FuncResult<Insertion> {
        if point.x.is_nan() {
            return Err(FuncError::domain(point.x, "x-value cannot be NaN"));
        }

        match self.binary_search(point.x) {
            Ok(index) => {
                match self.policy {
                    MergePolicy::Replace => self.ys[index] = point.y,
                    MergePolicy::Sum => self.ys[index] += point.y,
                }
                trace!(
                    "merged x={} into existing x={} ({:?})",
                    point.x, self.xs[index], self.policy
                );
                Ok(Insertion::Merged(index))
            }
            Err(index) => {
                self.xs.insert(index, point.x);
                self.ys.insert(index, point.y);
                Ok(Insertion::Inserted(index))
            }
        }
    }

    /// Replaces the value stored at `index`.
    pub fn set_y(&mut self, index: usize, y: f64) -> FuncResult<()> {
        let size = self.len();
        let slot = self
            .ys
            .get_mut(index)
            .ok_or(FuncError::IndexOutOfBounds { index, size })?;
        *slot = y;
        Ok(())
    }

    /// Removes and returns the point at `index`.
    pub fn remove(&mut self, index: usize) -> FuncResult<Point> {
        if index >= self.len() {
            return Err(FuncError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(Point::new(self.xs.remove(index), self.ys.remove(index)))
    }

    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }

    pub fn min_x(&self) -> Option<f64> {
        self.xs.first().copied()
    }

    pub fn max_x(&self) -> Option<f64> {
        self.xs.last().copied()
    }

    /// Smallest stored value; NaN values are skipped.
    pub fn min_y(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.ys.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Largest stored value; NaN values are skipped.
    pub fn max_y(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.ys.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Index `i` with `x(i) <= x < x(i+1)`.
    ///
    /// An exact (within tolerance) match at `i` yields `i - 1`. `None` means
    /// `x` is at or below the first point.
    pub fn x_index_before(&self, x: f64) -> Option<usize> {
        match self.binary_search(x) {
            Ok(index) => index.checked_sub(1),
            Err(insertion) => insertion.checked_sub(1),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }
}

fn check_tolerance(tolerance: f64) -> FuncResult<()> {
    crate::validation_utils::validate_tolerance(tolerance).into_result("setting tolerance")
}

impl Container for ToleranceSortedList {
    fn values(&self) -> &[f64] {
        &self.ys
    }
}

impl ContainerMut for ToleranceSortedList {
    fn values_mut(&mut self) -> &mut [f64] {
        &mut self.ys
    }
}

impl Validate for ToleranceSortedList {
    fn validate(&self) -> crate::types::ValidationResult {
        crate::function::validation::validate_sorted_points(&self.xs, &self.ys, self.tolerance)
    }
}
