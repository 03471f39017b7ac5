//! Statistics derived from discretized functions: weighted empirical
//! distributions, integer sampling and histograms.

pub mod empirical;
pub mod histogram;
pub mod sampler;

pub use empirical::{EmpiricalDistribution, calc_fractile_from_norm_cdf, calc_quick_norm_cdf};
pub use histogram::HistogramFunction;
pub use sampler::IntegerPdfSampler;
