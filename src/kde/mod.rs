//! Kernel density estimation for the diagonal cells of the grid.
//!
//! - [`kernel`] - The Epanechnikov weighting function
//! - [`KernelDensityEstimator`] - The 1-D estimator that turns a sample into a [`DensityCurve`](crate::DensityCurve)

pub mod kernel;
mod univariate;

pub(crate) use univariate::DEFAULT_STEP;
pub use univariate::{KernelDensityEstimator, estimate_1d};
