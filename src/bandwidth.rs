//! Per-cell smoothing bandwidths.
//!
//! [`BandwidthMatrix`] stores one positive bandwidth for every cell of the
//! lower-triangular grid. It is addressed only through [`GridCoord`], so an
//! upper-triangle or ragged entry cannot be represented, and every stored
//! value has passed the same check the estimator applies.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, check_bandwidth};
use crate::grid::{GridCoord, cell_count, enumerate_coords};

/// Bandwidth used for a cell nobody has edited.
pub const DEFAULT_BANDWIDTH: f64 = 5.0;

/// A lower-triangular `dim x dim` matrix of positive bandwidths.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBandwidthMatrix"))]
pub struct BandwidthMatrix {
    dim: usize,
    /// Entries in linear-index order.
    values: Vec<f64>,
}

impl BandwidthMatrix {
    /// Create a matrix with every cell set to `default`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `default` is not a positive finite number.
    pub fn new(dim: usize, default: f64) -> Result<Self> {
        let default = check_bandwidth(default)?;
        Ok(Self {
            dim,
            values: vec![default; cell_count(dim)],
        })
    }

    /// Build a matrix from nested rows, row `r` holding columns `0..=r`.
    ///
    /// If `rows` does not have exactly that shape, or any entry is not a
    /// positive finite number, the input is ignored and every cell gets
    /// `default`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `default` itself is invalid.
    pub fn from_rows(dim: usize, rows: &[Vec<f64>], default: f64) -> Result<Self> {
        let mut matrix = Self::new(dim, default)?;
        let well_formed = rows.len() == dim
            && rows.iter().enumerate().all(|(r, row)| {
                row.len() == r + 1 && row.iter().all(|&h| check_bandwidth(h).is_ok())
            });
        if well_formed {
            matrix.values = rows.iter().flatten().copied().collect();
        }
        Ok(matrix)
    }

    /// Grid dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The bandwidth of `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfRange`] if `coord` is outside the grid.
    pub fn get(&self, coord: GridCoord) -> Result<f64> {
        let coord = coord.check(self.dim)?;
        Ok(self.values[coord.linear_index()])
    }

    /// Replace the bandwidth of `coord`.
    ///
    /// On error the matrix is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfRange`] for a cell outside the grid and
    /// `Error::InvalidParameter` for a non-positive or non-finite value.
    pub fn set(&mut self, coord: GridCoord, value: f64) -> Result<()> {
        let coord = coord.check(self.dim)?;
        self.values[coord.linear_index()] = check_bandwidth(value)?;
        Ok(())
    }

    /// Parse `text` as a bandwidth and store it in `coord`.
    ///
    /// Returns the parsed value. On error the matrix is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `text` is not a number, plus
    /// everything [`set`](Self::set) returns.
    pub fn set_text(&mut self, coord: GridCoord, text: &str) -> Result<f64> {
        let value = parse_bandwidth(text)?;
        self.set(coord, value)?;
        Ok(value)
    }

    /// `(coord, bandwidth)` for every cell in linear-index order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, f64)> + '_ {
        enumerate_coords(self.dim)
            .into_iter()
            .zip(self.values.iter().copied())
    }

    /// The matrix as nested rows, the inverse of [`from_rows`](Self::from_rows).
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.dim)
            .map(|row| {
                let start = cell_count(row);
                self.values[start..=start + row].to_vec()
            })
            .collect()
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBandwidthMatrix {
    dim: usize,
    values: Vec<f64>,
}

/// Deserialized matrices go through the same checks as [`BandwidthMatrix::new`].
#[cfg(feature = "serde")]
impl TryFrom<RawBandwidthMatrix> for BandwidthMatrix {
    type Error = Error;

    fn try_from(RawBandwidthMatrix { dim, values }: RawBandwidthMatrix) -> Result<Self> {
        let expected = cell_count(dim);
        if values.len() != expected {
            return Err(Error::InvalidParameter {
                name: "bandwidths",
                reason: format!(
                    "{} values for a grid of dimension {dim}, expected {expected}",
                    values.len()
                ),
            });
        }
        for &value in &values {
            check_bandwidth(value)?;
        }
        Ok(Self { dim, values })
    }
}

/// Parse user-entered bandwidth text.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if the text is not a positive finite number.
pub fn parse_bandwidth(text: &str) -> Result<f64> {
    let value = text.trim().parse::<f64>().map_err(|_| Error::InvalidParameter {
        name: "bandwidth",
        reason: format!("{text:?} is not a number"),
    })?;
    check_bandwidth(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_cell() {
        let m = BandwidthMatrix::new(3, DEFAULT_BANDWIDTH).unwrap();
        assert_eq!(m.iter().count(), 6);
        assert!(m.iter().all(|(_, h)| (h - 5.0).abs() < f64::EPSILON));
    }

    #[test]
    fn set_touches_one_cell() {
        let mut m = BandwidthMatrix::new(2, 5.0).unwrap();
        m.set(GridCoord::new(1, 0), 2.5).unwrap();
        assert!((m.get(GridCoord::new(1, 0)).unwrap() - 2.5).abs() < f64::EPSILON);
        assert!((m.get(GridCoord::new(0, 0)).unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((m.get(GridCoord::new(1, 1)).unwrap() - 5.0).abs() < f64::EPSILON);
        // symmetric addressing
        assert!((m.get(GridCoord::new(0, 1)).unwrap() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejected_edit_leaves_matrix_unchanged() {
        let mut m = BandwidthMatrix::new(2, 5.0).unwrap();
        let before = m.clone();
        assert!(m.set(GridCoord::new(1, 0), 0.0).is_err());
        assert!(m.set(GridCoord::new(1, 0), -1.0).is_err());
        assert!(m.set_text(GridCoord::new(1, 0), "abc").is_err());
        assert!(matches!(
            m.set(GridCoord::new(2, 0), 1.0),
            Err(Error::CellOutOfRange { .. })
        ));
        assert_eq!(m, before);
    }

    #[test]
    fn text_edits() {
        let mut m = BandwidthMatrix::new(1, 5.0).unwrap();
        assert!((m.set_text(GridCoord::new(0, 0), " 0.75 ").unwrap() - 0.75).abs() < 1e-12);
        assert!((m.get(GridCoord::new(0, 0)).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn from_rows_round_trip() {
        let rows = vec![vec![1.0], vec![2.0, 3.0]];
        let m = BandwidthMatrix::from_rows(2, &rows, 5.0).unwrap();
        assert_eq!(m.to_rows(), rows);
    }

    #[test]
    fn malformed_rows_fall_back_to_default() {
        let default = BandwidthMatrix::new(2, 5.0).unwrap();
        let square = vec![vec![1.0, 1.0], vec![2.0, 3.0]];
        assert_eq!(BandwidthMatrix::from_rows(2, &square, 5.0).unwrap(), default);
        let short = vec![vec![1.0]];
        assert_eq!(BandwidthMatrix::from_rows(2, &short, 5.0).unwrap(), default);
        let negative = vec![vec![1.0], vec![-2.0, 3.0]];
        assert_eq!(BandwidthMatrix::from_rows(2, &negative, 5.0).unwrap(), default);
    }

    #[test]
    fn out_of_grid_coordinates_are_rejected() {
        let mut m = BandwidthMatrix::new(3, 5.0).unwrap();
        let before = m.clone();
        for coord in [GridCoord::new(1, 5), GridCoord::new(3, 0), "4,4".parse().unwrap()] {
            assert!(matches!(
                m.set(coord, 1.0),
                Err(Error::CellOutOfRange { dim: 3, .. })
            ));
            assert!(matches!(m.get(coord), Err(Error::CellOutOfRange { .. })));
        }
        assert_eq!(m, before);
    }

    #[test]
    fn invalid_default() {
        assert!(BandwidthMatrix::new(2, 0.0).is_err());
    }
}
