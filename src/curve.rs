//! Piecewise-linear density curves in view-box coordinates.

use core::fmt::Write as _;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of `(x, y)` points joined by straight segments.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DensityCurve {
    points: Vec<(f64, f64)>,
}

impl DensityCurve {
    /// Wrap an existing list of points.
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// The points of the curve, in drawing order.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the curve and return its points.
    #[must_use]
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// SVG path data, `M x0,y0Lx1,y1...`; empty for an empty curve.
    #[must_use]
    pub fn to_path_data(&self) -> String {
        polyline_path_data(&self.points)
    }
}

/// `M x0,y0Lx1,y1...` for an open polyline.
pub(crate) fn polyline_path_data(points: &[(f64, f64)]) -> String {
    let mut path = String::with_capacity(points.len() * 12);
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(path, "{cmd}{x},{y}");
    }
    path
}

impl FromIterator<(f64, f64)> for DensityCurve {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
