//! Linear screen-space scales.
//!
//! Every plot cell uses a `100 x 100` view box; sample values are mapped into
//! `[0, 100]` horizontally and density or the second variable into `[100, 0]`
//! vertically, so larger values sit higher on screen.

/// Lower bound of the view-box coordinate range.
pub const RANGE_MIN: f64 = 0.0;
/// Upper bound of the view-box coordinate range.
pub const RANGE_MAX: f64 = 100.0;
/// Finest accepted mesh step; a mesh never has more than `1_000_001` points.
pub const MIN_STEP: f64 = 1e-4;

/// An affine map from a `domain` interval onto a `range` interval.
///
/// A zero-width domain has no meaningful slope: [`apply`](Self::apply) sends
/// every value to the middle of the range and [`invert`](Self::invert) sends
/// every coordinate to the domain's start, so callers get flat output
/// instead of NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale from `domain` to `range`.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map `domain` onto the horizontal view-box axis `[0, 100]`.
    #[must_use]
    pub fn horizontal(domain: (f64, f64)) -> Self {
        Self::new(domain, (RANGE_MIN, RANGE_MAX))
    }

    /// Map `domain` onto the vertical view-box axis `[100, 0]`.
    #[must_use]
    pub fn vertical(domain: (f64, f64)) -> Self {
        Self::new(domain, (RANGE_MAX, RANGE_MIN))
    }

    /// The input interval.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The output interval.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the range.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let t = normalize(value, self.domain);
        lerp(t, self.range)
    }

    /// Map a range coordinate back to the domain.
    #[must_use]
    pub fn invert(&self, coordinate: f64) -> f64 {
        let width = self.domain.1 - self.domain.0;
        if width == 0.0 {
            return self.domain.0;
        }
        let t = normalize(coordinate, self.range);
        lerp(t, self.domain)
    }
}

/// Position of `value` within `interval` as a fraction; `0.5` for an empty interval.
fn normalize(value: f64, (start, end): (f64, f64)) -> f64 {
    let width = end - start;
    if width == 0.0 {
        0.5
    } else {
        (value - start) / width
    }
}

fn lerp(t: f64, (start, end): (f64, f64)) -> f64 {
    start + t * (end - start)
}

/// Minimum and maximum of `values`, or `None` when empty.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
