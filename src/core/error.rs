//! Error types for the deduction engine.
//!
//! Every variant except `PassLimitExceeded` means the observation feed
//! contradicts itself. The engine reports these instead of clamping counts.

use thiserror::Error;

use super::cell::Cell;

/// Errors raised while incorporating knowledge.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    /// A cell outside the configured board.
    #[error("cell {cell} is outside the {width}x{height} board")]
    OutOfBounds {
        cell: Cell,
        width: usize,
        height: usize,
    },

    /// A count was reported for a cell already proven to be a mine.
    #[error("observed cell {0} is a known mine")]
    ObservedKnownMine(Cell),

    /// A cell was proven both a mine and safe.
    #[error("cell {0} cannot be both a mine and safe")]
    ConflictingMark(Cell),

    /// A clause claims more mines than it has cells.
    #[error("count {count} exceeds the {cells} unresolved cells")]
    CountExceedsCells { count: usize, cells: usize },

    /// Marking a mine would drive a clause count below zero.
    #[error("marking {0} as a mine drives a clause count below zero")]
    NegativeCount(Cell),

    /// A clause disagrees with a live clause over exactly the same cells.
    #[error("clause {clause} contradicts a live clause over the same cells with count {live}")]
    ConflictingClause { clause: String, live: usize },

    /// Subset inference produced a negative count.
    #[error("subset inference of {superset} minus {subset} yields a negative count")]
    NegativeDerivedCount { subset: String, superset: String },

    /// The fixed-point loop hit the configured pass limit.
    #[error("deduction did not converge within {0} passes")]
    PassLimitExceeded(u32),
}

impl KnowledgeError {
    /// Check if the error indicates inconsistent input rather than a limit.
    #[must_use]
    pub fn is_contradiction(&self) -> bool {
        !matches!(self, KnowledgeError::PassLimitExceeded(_) | KnowledgeError::OutOfBounds { .. })
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, KnowledgeError>;
