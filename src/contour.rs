//! The seam to an external 2-D density contouring service.
//!
//! Off-diagonal cells are drawn as iso-density contours. This crate does not
//! smooth in two dimensions itself: it scales the cell's pairs into the view
//! box (see [`CellSample::scaled_points`](crate::CellSample::scaled_points))
//! and hands them, together with the cell's bandwidth, to a
//! [`ContourEstimator`].

use crate::curve::polyline_path_data;

/// A closed polygon in view-box coordinates.
pub type Ring = Vec<(f64, f64)>;

/// Produces iso-density contours for a set of 2-D points.
///
/// Implementations return rings ordered from the lowest to the highest
/// density level. Any `Fn(&[(f64, f64)], f64) -> Vec<Ring>` is a
/// `ContourEstimator`.
///
/// # Implementing a custom estimator
///
/// ```
/// use marginals::contour::{ContourEstimator, Ring};
///
/// /// Draws one square around the points' bounding box.
/// struct BoundingBox;
///
/// impl ContourEstimator for BoundingBox {
///     fn contours(&self, points: &[(f64, f64)], bandwidth: f64) -> Vec<Ring> {
///         if points.is_empty() {
///             return Vec::new();
///         }
///         let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
///         for &(x, y) in points {
///             x0 = x0.min(x - bandwidth);
///             y0 = y0.min(y - bandwidth);
///             x1 = x1.max(x + bandwidth);
///             y1 = y1.max(y + bandwidth);
///         }
///         vec![vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]]
///     }
/// }
///
/// let rings = BoundingBox.contours(&[(10.0, 10.0), (20.0, 30.0)], 1.0);
/// assert_eq!(rings[0][0], (9.0, 9.0));
/// ```
pub trait ContourEstimator {
    /// Contour rings for `points`, lowest density level first.
    fn contours(&self, points: &[(f64, f64)], bandwidth: f64) -> Vec<Ring>;
}

impl<F> ContourEstimator for F
where
    F: Fn(&[(f64, f64)], f64) -> Vec<Ring>,
{
    fn contours(&self, points: &[(f64, f64)], bandwidth: f64) -> Vec<Ring> {
        self(points, bandwidth)
    }
}

/// Colour-ramp position for the `index`-th of `count` contour levels.
///
/// The outermost level gets `1.0`, fading linearly towards `0.25`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn level_intensity(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 1.0;
    }
    1.0 - 0.75 * index as f64 / count as f64
}

/// SVG path data for a closed ring, `M x,yL...Z`; empty for an empty ring.
#[must_use]
pub fn ring_path_data(ring: &[(f64, f64)]) -> String {
    if ring.is_empty() {
        return String::new();
    }
    let mut path = polyline_path_data(ring);
    path.push('Z');
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_estimators() {
        let single = |points: &[(f64, f64)], _bandwidth: f64| vec![points.to_vec()];
        let rings = single.contours(&[(1.0, 2.0)], 4.0);
        assert_eq!(rings, vec![vec![(1.0, 2.0)]]);
    }

    #[test]
    fn intensity_ramp() {
        assert!((level_intensity(0, 4) - 1.0).abs() < 1e-12);
        assert!((level_intensity(2, 4) - 0.625).abs() < 1e-12);
        assert!((level_intensity(0, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ring_paths_close() {
        assert_eq!(
            ring_path_data(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.5)]),
            "M0,0L10,0L10,5.5Z"
        );
        assert_eq!(ring_path_data(&[]), "");
    }
}
