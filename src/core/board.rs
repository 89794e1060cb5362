//! Board geometry.
//!
//! The engine never sees mines directly; it only needs to know how big the
//! board is so it can clip neighborhoods and enumerate candidate moves.
//!
//! `height` counts rows and `width` counts columns, so a valid cell has
//! `row < height` and `col < width`.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::error::{KnowledgeError, Result};

/// Board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub width: usize,
    pub height: usize,
}

impl Board {
    /// Create a board of `width` columns and `height` rows.
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if a cell lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Return `Ok(())` if the cell is on the board.
    pub fn check(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(KnowledgeError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Iterate over the neighbors of `cell`, clipped to the board.
    ///
    /// Yields cells within Chebyshev distance 1, excluding `cell` itself,
    /// in row-major order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let rows = cell.row.saturating_sub(1)..=(cell.row + 1).min(self.height.saturating_sub(1));
        let cols = cell.col.saturating_sub(1)..=(cell.col + 1).min(self.width.saturating_sub(1));

        rows.flat_map(move |row| cols.clone().map(move |col| Cell::new(row, col)))
            .filter(move |&c| c != cell && self.contains(c))
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_neighbors() {
        let board = Board::new(3, 3);
        let neighbors: Vec<_> = board.neighbors(Cell::new(0, 0)).collect();

        assert_eq!(neighbors, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn test_center_neighbors() {
        let board = Board::new(3, 3);
        let neighbors: Vec<_> = board.neighbors(Cell::new(1, 1)).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_edge_neighbors_on_wide_board() {
        let board = Board::new(5, 2);
        let neighbors: Vec<_> = board.neighbors(Cell::new(1, 4)).collect();

        assert_eq!(neighbors, vec![Cell::new(0, 3), Cell::new(0, 4), Cell::new(1, 3)]);
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        let board = Board::new(1, 1);
        assert_eq!(board.neighbors(Cell::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_cells_row_major() {
        let board = Board::new(2, 2);
        let cells: Vec<_> = board.cells().collect();

        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
        assert_eq!(board.cell_count(), 4);
    }

    #[test]
    fn test_bounds_check() {
        let board = Board::new(4, 2);

        assert!(board.check(Cell::new(1, 3)).is_ok());
        assert_eq!(
            board.check(Cell::new(2, 0)),
            Err(KnowledgeError::OutOfBounds {
                cell: Cell::new(2, 0),
                width: 4,
                height: 2,
            })
        );
    }
}
