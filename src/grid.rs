//! Bijection between linear indices and the lower-triangular cell grid.
//!
//! A dataset of dimension `d` is drawn as a `d x d` grid of which only the
//! lower triangle (diagonal included) is populated, `d * (d + 1) / 2` cells
//! in total. Cells are numbered row by row:
//!
//! ```text
//! row 0:  0
//! row 1:  1  2
//! row 2:  3  4  5
//! ```
//!
//! so `(row, col)` has linear index `col + row * (row + 1) / 2`.
//!
//! # Example
//!
//! ```
//! use marginals::grid::{GridCoord, enumerate_coords, to_grid, to_linear};
//!
//! assert_eq!(to_linear(3, 2, 1), 4);
//! assert_eq!(to_grid(3, 4).unwrap(), GridCoord::new(2, 1));
//! assert_eq!(enumerate_coords(2).len(), 3);
//! ```

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cell of the lower-triangular grid.
///
/// The fields are private and every constructor orders the two indices, so
/// `col <= row` always holds; an upper-triangle cell cannot be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGridCoord"))]
pub struct GridCoord {
    row: usize,
    col: usize,
}

impl GridCoord {
    /// Create a coordinate from two axis indices in either order.
    ///
    /// The larger index becomes the row, so `new(0, 1) == new(1, 0)`.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            row: a.max(b),
            col: a.min(b),
        }
    }

    /// The row, i.e. the vertical axis of the cell.
    #[must_use]
    pub fn row(self) -> usize {
        self.row
    }

    /// The column, i.e. the horizontal axis of the cell.
    #[must_use]
    pub fn col(self) -> usize {
        self.col
    }

    /// Whether this cell shows a single variable.
    #[must_use]
    pub fn is_diagonal(self) -> bool {
        self.row == self.col
    }

    /// The linear index of this cell.
    #[must_use]
    pub fn linear_index(self) -> usize {
        self.col + triangular(self.row)
    }

    /// Check that the cell lies inside a grid of dimension `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfRange`] if `row >= dim` or `col > row`.
    pub fn check(self, dim: usize) -> Result<Self> {
        if self.row < dim && self.col <= self.row {
            Ok(self)
        } else {
            Err(Error::CellOutOfRange {
                row: self.row,
                col: self.col,
                dim,
            })
        }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(usize, usize)> for GridCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGridCoord {
    row: usize,
    col: usize,
}

/// Serialized coordinates are not reordered: an upper-triangle pair is rejected.
#[cfg(feature = "serde")]
impl TryFrom<RawGridCoord> for GridCoord {
    type Error = Error;

    fn try_from(RawGridCoord { row, col }: RawGridCoord) -> Result<Self> {
        if col > row {
            return Err(Error::InvalidCoordinate(format!("{row},{col}")));
        }
        Ok(Self { row, col })
    }
}

/// Parses the `"row,col"` form emitted by click handlers.
impl FromStr for GridCoord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<usize>().map_err(|_| invalid())?;
        let col = col.trim().parse::<usize>().map_err(|_| invalid())?;
        Ok(Self::new(row, col))
    }
}

/// `n * (n + 1) / 2`, the number of cells in the first `n` rows.
#[inline]
fn triangular(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Number of cells in the lower-triangular grid of dimension `d`.
#[must_use]
pub fn cell_count(d: usize) -> usize {
    triangular(d)
}

/// Map two axis indices to a linear index.
///
/// The arguments are order-independent. Each is clamped to `d - 1`, so an
/// out-of-range index lands on the last row instead of failing; a clamped
/// result is not a sign that the input was valid.
#[must_use]
pub fn to_linear(d: usize, i: usize, j: usize) -> usize {
    let last = d.saturating_sub(1);
    GridCoord::new(i.min(last), j.min(last)).linear_index()
}

/// Map a linear index back to its grid cell.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `k >= d * (d + 1) / 2`.
pub fn to_grid(d: usize, k: usize) -> Result<GridCoord> {
    let len = cell_count(d);
    if k >= len {
        return Err(Error::OutOfRange { index: k, len });
    }

    // Walk the triangular numbers T(l) = (l + 1)(l + 2) / 2 until k < T(l).
    let mut row = 0;
    while k >= triangular(row + 1) {
        row += 1;
    }
    Ok(GridCoord {
        row,
        col: k - triangular(row),
    })
}

/// The grid row by row; row `r` holds the cells `(r, 0)..=(r, r)`.
#[must_use]
pub fn enumerate_rows(d: usize) -> Vec<Vec<GridCoord>> {
    (0..d)
        .map(|row| (0..=row).map(|col| GridCoord { row, col }).collect())
        .collect()
}

/// Every cell of the grid in increasing linear-index order.
#[must_use]
pub fn enumerate_coords(d: usize) -> Vec<GridCoord> {
    (0..cell_count(d))
        .filter_map(|k| to_grid(d, k).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_linear_is_symmetric_and_clamped() {
        assert_eq!(to_linear(3, 0, 0), 0);
        assert_eq!(to_linear(3, 1, 0), 1);
        assert_eq!(to_linear(3, 0, 1), 1);
        assert_eq!(to_linear(3, 2, 2), 5);
        // clamps to the last row
        assert_eq!(to_linear(3, 7, 9), 5);
        assert_eq!(to_linear(3, 0, 9), 3);
        assert_eq!(to_linear(0, 4, 4), 0);
    }

    #[test]
    fn to_grid_inverts_to_linear() {
        for d in 1..12 {
            for k in 0..cell_count(d) {
                let c = to_grid(d, k).unwrap();
                assert!(c.col <= c.row);
                assert!(c.row < d);
                assert_eq!(to_linear(d, c.row, c.col), k);
            }
        }
    }

    #[test]
    fn to_grid_out_of_range() {
        assert_eq!(
            to_grid(3, 10),
            Err(Error::OutOfRange { index: 10, len: 6 })
        );
        assert_eq!(to_grid(3, 6), Err(Error::OutOfRange { index: 6, len: 6 }));
        assert!(to_grid(0, 0).is_err());
    }

    #[test]
    fn rows_and_coords_agree() {
        for d in 0..8 {
            let flat: Vec<_> = enumerate_rows(d).into_iter().flatten().collect();
            assert_eq!(flat, enumerate_coords(d));
        }
    }

    #[test]
    fn coord_parsing() {
        assert_eq!("1,0".parse::<GridCoord>(), Ok(GridCoord::new(1, 0)));
        assert_eq!(" 0 , 2 ".parse::<GridCoord>(), Ok(GridCoord::new(2, 0)));
        assert!(matches!(
            "1;0".parse::<GridCoord>(),
            Err(Error::InvalidCoordinate(_))
        ));
        assert!("a,1".parse::<GridCoord>().is_err());
        assert_eq!(GridCoord::new(2, 1).to_string(), "2,1");
    }

    #[test]
    fn coord_check() {
        assert!(GridCoord::new(1, 1).check(2).is_ok());
        assert_eq!(
            GridCoord { row: 1, col: 2 }.check(3),
            Err(Error::CellOutOfRange {
                row: 1,
                col: 2,
                dim: 3
            })
        );
        assert_eq!(
            GridCoord::new(2, 0).check(2),
            Err(Error::CellOutOfRange {
                row: 2,
                col: 0,
                dim: 2
            })
        );
    }
}
