//! Storage building blocks shared by the function types.

pub mod sorted;

pub use sorted::{Insertion, MergePolicy, ToleranceSortedList};

/// Read access to the y-values of a storage strategy, in x order.
pub trait Container {
    fn values(&self) -> &[f64];
}

/// In-place write access to the y-values. The x domain cannot be changed
/// through this trait.
pub trait ContainerMut: Container {
    fn values_mut(&mut self) -> &mut [f64];
}
