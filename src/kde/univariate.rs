//! Kernel density estimation for a single variable.
//!
//! The estimator evaluates the summed Epanechnikov density on a regular mesh
//! over the view box and returns it already mapped into screen coordinates:
//! mesh positions run from `0` to `100` and the density axis is flipped so
//! the highest peak touches `0`.

use super::kernel::epanechnikov;
use crate::curve::DensityCurve;
use crate::error::{Error, Result, check_bandwidth, check_step};
use crate::scale::{LinearScale, RANGE_MAX, extent};

/// Default mesh step in view-box units.
pub(crate) const DEFAULT_STEP: f64 = 1.0;

/// An Epanechnikov kernel density estimator over a fixed view-box mesh.
///
/// # Examples
///
/// ```
/// use marginals::kde::KernelDensityEstimator;
///
/// let kde = KernelDensityEstimator::new(0.5).unwrap();
/// let curve = kde.estimate(&[1.0, 2.0, 2.5, 4.0]).unwrap();
///
/// assert_eq!(curve.len(), 101);
/// assert_eq!(curve.points()[0].0, 0.0);
/// assert_eq!(curve.points()[100].0, 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelDensityEstimator {
    /// Kernel half-width in sample units.
    bandwidth: f64,
    /// Distance between mesh points in view-box units.
    step: f64,
}

impl KernelDensityEstimator {
    /// Creates an estimator with the given bandwidth and a mesh step of `1.0`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `bandwidth` is not a positive finite number.
    pub fn new(bandwidth: f64) -> Result<Self> {
        Ok(Self {
            bandwidth: check_bandwidth(bandwidth)?,
            step: DEFAULT_STEP,
        })
    }

    /// Replaces the mesh step.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `step` is not in
    /// `[MIN_STEP, 100]` (see [`MIN_STEP`](crate::scale::MIN_STEP)).
    pub fn with_step(self, step: f64) -> Result<Self> {
        Ok(Self {
            step: check_step("step", step)?,
            ..self
        })
    }

    /// Returns the bandwidth of this estimator.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Returns the mesh step of this estimator.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of mesh points, `floor(100 / step) + 1`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn mesh_len(&self) -> usize {
        ((RANGE_MAX / self.step).floor() as usize).saturating_add(1)
    }

    /// Unnormalized density of `sample` at the sample-space location `x`.
    #[must_use]
    pub fn density_at(&self, sample: &[f64], x: f64) -> f64 {
        sample
            .iter()
            .map(|&center| epanechnikov(x, center, self.bandwidth))
            .sum()
    }

    /// Raw `(mesh position, density)` pairs before vertical scaling.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptySample` if `sample` is empty and
    /// `Error::InvalidParameter` if it contains a non-finite value.
    #[allow(clippy::cast_precision_loss)]
    pub fn densities(&self, sample: &[f64]) -> Result<Vec<(f64, f64)>> {
        if let Some(bad) = sample.iter().position(|v| !v.is_finite()) {
            return Err(Error::invalid_parameter(
                "sample",
                format!("value at index {bad} is not finite"),
            ));
        }
        let domain = extent(sample.iter().copied()).ok_or(Error::EmptySample)?;
        let x_scale = LinearScale::horizontal(domain);

        Ok((0..self.mesh_len())
            .map(|i| {
                let position = i as f64 * self.step;
                let x = x_scale.invert(position);
                (position, self.density_at(sample, x))
            })
            .collect())
    }

    /// Estimates the density curve of `sample` in view-box coordinates.
    ///
    /// A sample whose values are all equal yields a flat curve at the top of
    /// the view box; a curve whose density is zero everywhere is flat at the
    /// vertical midpoint.
    ///
    /// # Errors
    ///
    /// Same as [`densities`](Self::densities).
    pub fn estimate(&self, sample: &[f64]) -> Result<DensityCurve> {
        let raw = self.densities(sample)?;
        let peak = raw.iter().map(|&(_, y)| y).fold(0.0, f64::max);
        let y_scale = LinearScale::vertical((0.0, peak));

        Ok(raw
            .into_iter()
            .map(|(position, density)| (position, y_scale.apply(density)))
            .collect())
    }
}

/// Estimate the density curve of `sample` with the given bandwidth and mesh step.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` for a non-positive bandwidth, a step
/// outside `[1e-4, 100]` or a non-finite sample value, and `Error::EmptySample`
/// for an empty sample.
///
/// # Examples
///
/// ```
/// use marginals::{Error, estimate_1d};
///
/// let curve = estimate_1d(&[0.0, 1.0, 2.0], 1.0, 1.0).unwrap();
/// assert_eq!(curve.len(), 101);
///
/// assert!(matches!(
///     estimate_1d(&[0.0, 1.0], 0.0, 1.0),
///     Err(Error::InvalidParameter { .. })
/// ));
/// ```
pub fn estimate_1d(sample: &[f64], bandwidth: f64, step: f64) -> Result<DensityCurve> {
    KernelDensityEstimator::new(bandwidth)?
        .with_step(step)?
        .estimate(sample)
}
