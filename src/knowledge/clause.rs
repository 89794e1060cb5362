//! Clauses: "exactly `count` of these cells are mines".
//!
//! ## Invariants
//!
//! - `count <= cells.len()`, checked at construction and on every mark.
//! - `count == cells.len() > 0`: every cell is a mine.
//! - `count == 0`: every cell is safe.
//! - No cells and a zero count: vacuous, the knowledge base drops it.
//!
//! Marks that would break an invariant are contradictions and come back
//! as errors; the clause is left untouched when that happens.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, KnowledgeError, Result};

/// Canonical form of a clause: sorted cells plus count.
///
/// Two clauses are structurally equal exactly when their keys are equal.
/// Keys order clauses in snapshots.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClauseKey {
    pub cells: SmallVec<[Cell; 8]>,
    pub count: usize,
}

/// A single mine-count constraint.
///
/// Deserialization goes through `Clause::new`, so a decoded clause obeys
/// the same invariants as a constructed one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawClause")]
pub struct Clause {
    cells: FxHashSet<Cell>,
    count: usize,
}

/// Unchecked wire form of a `Clause`.
#[derive(Deserialize)]
struct RawClause {
    cells: FxHashSet<Cell>,
    count: usize,
}

impl TryFrom<RawClause> for Clause {
    type Error = KnowledgeError;

    fn try_from(raw: RawClause) -> Result<Self> {
        Clause::new(raw.cells, raw.count)
    }
}

impl Clause {
    /// Create a clause over `cells` containing exactly `count` mines.
    ///
    /// Fails if `count` exceeds the number of distinct cells.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Result<Self> {
        let cells: FxHashSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(KnowledgeError::CountExceedsCells {
                count,
                cells: cells.len(),
            });
        }
        Ok(Self { cells, count })
    }

    /// Number of mines among the cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the clause has no cells left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if the clause carries no information.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.cells.is_empty() && self.count == 0
    }

    /// Check if `cell` is part of this clause.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterate over the cells (unordered).
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn sorted_cells(&self) -> SmallVec<[Cell; 8]> {
        let mut cells: SmallVec<[Cell; 8]> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Canonical key for deduplication.
    #[must_use]
    pub fn key(&self) -> ClauseKey {
        ClauseKey {
            cells: self.sorted_cells(),
            count: self.count,
        }
    }

    // === Direct Inference ===

    /// All cells, if every one of them must be a mine.
    #[must_use]
    pub fn inferred_mines(&self) -> FxHashSet<Cell> {
        if self.count > 0 && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            FxHashSet::default()
        }
    }

    /// All cells, if none of them can be a mine.
    #[must_use]
    pub fn inferred_safe(&self) -> FxHashSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            FxHashSet::default()
        }
    }

    // === Marks ===

    /// Remove `cell` as a known mine, decrementing the count.
    ///
    /// Returns whether the clause changed. A no-op if `cell` is not a member.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == 0 {
            return Err(KnowledgeError::NegativeCount(cell));
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(true)
    }

    /// Remove `cell` as known safe; the count is unchanged.
    ///
    /// Returns whether the clause changed. A no-op if `cell` is not a member.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        // Every remaining cell is a mine, so this one cannot be safe.
        if self.count == self.cells.len() {
            return Err(KnowledgeError::ConflictingMark(cell));
        }
        self.cells.remove(&cell);
        Ok(true)
    }

    // === Subset Inference ===

    /// Check if this clause's cells are a strict, non-empty subset of `other`'s.
    #[must_use]
    pub fn is_strict_subset_of(&self, other: &Clause) -> bool {
        !self.cells.is_empty()
            && self.cells.len() < other.cells.len()
            && self.cells.is_subset(&other.cells)
    }

    /// Derive `{superset - self, superset.count - self.count}`.
    ///
    /// Callers check `is_strict_subset_of` first. A negative count means
    /// the two clauses contradict each other.
    pub fn subtract_from(&self, superset: &Clause) -> Result<Clause> {
        let count = superset.count.checked_sub(self.count).ok_or_else(|| {
            KnowledgeError::NegativeDerivedCount {
                subset: self.to_string(),
                superset: superset.to_string(),
            }
        })?;
        Clause::new(superset.cells.difference(&self.cells).copied(), count)
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.cells == other.cells
    }
}

impl Eq for Clause {}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.sorted_cells().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}
