//! The Epanechnikov kernel.
//!
//! `K(u) = 0.75 * (1 - u^2)` on `|u| <= 1` and zero elsewhere, rescaled by
//! the bandwidth so that each kernel integrates to one. The compact support
//! means a sample only contributes to mesh points within one bandwidth of it.

/// Contribution of a sample at `center` to the density at `x`.
///
/// `bandwidth` must be strictly positive; callers validate it once up front.
#[inline]
#[must_use]
pub fn epanechnikov(x: f64, center: f64, bandwidth: f64) -> f64 {
    let offset = x - center;
    if offset.abs() > bandwidth {
        return 0.0;
    }
    let u = offset / bandwidth;
    0.75 * (1.0 - u * u) / bandwidth
}
