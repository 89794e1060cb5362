//! Move selection over a knowledge base.
//!
//! Selection never mutates knowledge. The driver decides what to do when
//! both pools are empty.

use crate::core::{Board, Cell, MoveRng};
use crate::knowledge::KnowledgeBase;

/// Read-only view that picks the next cell to probe.
#[derive(Clone, Copy, Debug)]
pub struct MoveSelector<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> MoveSelector<'a> {
    #[must_use]
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// A cell proven safe that has not been played yet.
    ///
    /// Deterministic: returns the first such cell in row-major order, or
    /// `None` if every known safe cell was already played.
    #[must_use]
    pub fn safe_move(&self) -> Option<Cell> {
        self.kb
            .known_safe()
            .into_iter()
            .find(|&cell| !self.kb.is_played(cell))
    }

    /// A uniformly random cell that is neither played nor a known mine.
    ///
    /// Returns `None` when no such cell remains on a `width` by `height`
    /// board.
    pub fn random_move(&self, width: usize, height: usize, rng: &mut MoveRng) -> Option<Cell> {
        let candidates = self.candidates(Board::new(width, height));
        rng.choose(&candidates).copied()
    }

    /// Cells `random_move` chooses from, in row-major order.
    #[must_use]
    pub fn candidates(&self, board: Board) -> Vec<Cell> {
        board
            .cells()
            .filter(|&cell| !self.kb.is_played(cell) && !self.kb.is_mine(cell))
            .collect()
    }
}
