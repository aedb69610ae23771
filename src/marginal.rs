//! Datasets and the per-cell samples derived from them.
//!
//! A [`Dataset`] is a list of equal-length vectors. Each grid cell `(row, col)`
//! looks at the dataset through one or two of its components:
//!
//! - on the diagonal, the sample is every vector's `row`-th component;
//! - below it, the sample is the pair `(v[col], v[row])` for every vector, so
//!   the column variable is horizontal and the row variable vertical.
//!
//! # Example
//!
//! ```
//! use marginals::{CellSample, GridCoord, extract_marginals};
//!
//! let grid = extract_marginals(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
//! assert_eq!(grid.dim(), 2);
//! assert_eq!(
//!     grid.get(GridCoord::new(1, 0)),
//!     Some(&CellSample::Bivariate(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]))
//! );
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{GridCoord, enumerate_rows};
use crate::scale::{LinearScale, extent};

/// A validated list of vectors sharing one dimension.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    vectors: Vec<Vec<f64>>,
    dim: usize,
}

impl Dataset {
    /// Validate `vectors` and take ownership of them.
    ///
    /// The dimension is the length of the first vector; an empty list has
    /// dimension zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if a vector's length differs from
    /// the first one and [`Error::NonFiniteValue`] for NaN or infinite entries.
    pub fn new(vectors: Vec<Vec<f64>>) -> Result<Self> {
        let dim = vectors.first().map_or(0, Vec::len);
        for (vector_index, v) in vectors.iter().enumerate() {
            if v.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    got: v.len(),
                    vector_index,
                });
            }
            if let Some(component) = v.iter().position(|x| !x.is_finite()) {
                return Err(Error::NonFiniteValue {
                    vector_index,
                    component,
                });
            }
        }
        Ok(Self { vectors, dim })
    }

    /// Number of components per vector.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether there is nothing to plot (no vectors or zero dimension).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty() || self.dim == 0
    }

    /// The underlying vectors.
    #[must_use]
    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    /// The sample shown in `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfRange`] if `coord` is outside the grid.
    pub fn cell_sample(&self, coord: GridCoord) -> Result<CellSample> {
        let coord = coord.check(self.dim)?;
        let (row, col) = (coord.row(), coord.col());
        Ok(if row == col {
            CellSample::Univariate(self.vectors.iter().map(|v| v[row]).collect())
        } else {
            CellSample::Bivariate(self.vectors.iter().map(|v| (v[col], v[row])).collect())
        })
    }

    /// Every cell sample of the grid, row by row.
    #[must_use]
    pub fn marginals(&self) -> MarginalGrid {
        let rows = enumerate_rows(self.dim)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .filter_map(|coord| self.cell_sample(coord).ok())
                    .collect()
            })
            .collect();
        MarginalGrid { rows }
    }
}

/// The data behind one grid cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellSample {
    /// A single variable, for a diagonal cell.
    Univariate(Vec<f64>),
    /// `(v[col], v[row])` pairs, for an off-diagonal cell.
    Bivariate(Vec<(f64, f64)>),
}

impl CellSample {
    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Univariate(v) => v.len(),
            Self::Bivariate(v) => v.len(),
        }
    }

    /// Whether the sample has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The values of a diagonal cell.
    #[must_use]
    pub fn as_univariate(&self) -> Option<&[f64]> {
        match self {
            Self::Univariate(v) => Some(v),
            Self::Bivariate(_) => None,
        }
    }

    /// The pairs of an off-diagonal cell.
    #[must_use]
    pub fn as_bivariate(&self) -> Option<&[(f64, f64)]> {
        match self {
            Self::Univariate(_) => None,
            Self::Bivariate(v) => Some(v),
        }
    }

    /// Pairs mapped into the view box for the contour service.
    ///
    /// The first component spans `[0, 100]` left to right and the second
    /// `[100, 0]` bottom to top, each over its own min/max. Returns `None`
    /// for a diagonal cell.
    #[must_use]
    pub fn scaled_points(&self) -> Option<Vec<(f64, f64)>> {
        let pairs = self.as_bivariate()?;
        let x_domain = extent(pairs.iter().map(|p| p.0)).unwrap_or((0.0, 0.0));
        let y_domain = extent(pairs.iter().map(|p| p.1)).unwrap_or((0.0, 0.0));
        let x_scale = LinearScale::horizontal(x_domain);
        let y_scale = LinearScale::vertical(y_domain);
        Some(
            pairs
                .iter()
                .map(|&(x, y)| (x_scale.apply(x), y_scale.apply(y)))
                .collect(),
        )
    }
}

/// Cell samples for a whole grid; row `r` holds columns `0..=r`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarginalGrid {
    rows: Vec<Vec<CellSample>>,
}

impl MarginalGrid {
    /// Grid dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    /// The samples row by row.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellSample>] {
        &self.rows
    }

    /// The sample in `coord`, if it is inside the grid.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<&CellSample> {
        self.rows.get(coord.row())?.get(coord.col())
    }

    /// Iterate over `(coord, sample)` in linear-index order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &CellSample)> {
        self.rows.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .map(move |(col, sample)| (GridCoord::new(row, col), sample))
        })
    }
}

/// Validate `data` and derive the sample for every grid cell.
///
/// # Errors
///
/// Same as [`Dataset::new`].
pub fn extract_marginals(data: &[Vec<f64>]) -> Result<MarginalGrid> {
    Ok(Dataset::new(data.to_vec())?.marginals())
}
