//! Cell identification.
//!
//! Every square on the board is a `Cell`, addressed by `(row, col)`.
//!
//! ## Ordering
//!
//! Cells order row-major: first by row, then by column. The engine relies on
//! this order for canonical clause keys and for deterministic move selection.
//!
//! ## Usage
//!
//! ```
//! use minesweeper_kb::core::Cell;
//!
//! let a = Cell::new(0, 2);
//! let b = Cell::new(1, 0);
//!
//! assert!(a < b);
//! assert!(a.is_adjacent(Cell::new(1, 1)));
//! assert!(!a.is_adjacent(b));
//! ```

use serde::{Deserialize, Serialize};

/// A board coordinate.
///
/// Cells carry no state of their own; whether a cell is a mine, safe,
/// or already played lives in the knowledge base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance between two cells.
    ///
    /// ```
    /// use minesweeper_kb::core::Cell;
    ///
    /// assert_eq!(Cell::new(0, 0).distance(Cell::new(2, 1)), 2);
    /// assert_eq!(Cell::new(3, 3).distance(Cell::new(3, 3)), 0);
    /// ```
    #[must_use]
    pub const fn distance(self, other: Cell) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        if dr > dc {
            dr
        } else {
            dc
        }
    }

    /// Check whether `other` is one of the (up to) eight neighbors.
    ///
    /// A cell is not adjacent to itself.
    #[must_use]
    pub const fn is_adjacent(self, other: Cell) -> bool {
        self.distance(other) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
