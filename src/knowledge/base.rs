//! The knowledge base: live clauses plus certainty sets.
//!
//! ## Certainty Sets
//!
//! - `moves_made`: cells already probed
//! - `known_mines`: cells proven to be mines
//! - `known_safe`: cells proven not to be mines
//!
//! The sets only grow. `known_mines` and `known_safe` are disjoint, and no
//! cell in either appears in a live clause. All mutation goes through
//! `mark_mine`/`mark_safe`, which rewrite a copy of the clauses and only
//! commit it once every clause accepted the mark, so a contradiction leaves
//! the base unchanged.
//!
//! ## Clause Index
//!
//! Live clauses are indexed by their sorted cells. At most one clause lives
//! per cell set: an equal clause is dropped, and one with a different count
//! is a contradiction.
//!
//! Certainty sets are `im::OrdSet`s: accessors hand out O(1) copies that
//! iterate in row-major order.

use std::collections::hash_map::Entry;

use im::OrdSet;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use super::clause::Clause;
use super::snapshot::KnowledgeSnapshot;
use crate::core::{Cell, KnowledgeError, Result};

/// Count of the live clause over each sorted cell set.
type ClauseIndex = FxHashMap<SmallVec<[Cell; 8]>, usize>;

/// Session-scoped knowledge about one board.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    clauses: Vec<Clause>,
    index: ClauseIndex,
    moves_made: OrdSet<Cell>,
    known_mines: OrdSet<Cell>,
    known_safe: OrdSet<Cell>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Accessors ===

    /// Cells already probed.
    #[must_use]
    pub fn moves_made(&self) -> OrdSet<Cell> {
        self.moves_made.clone()
    }

    /// Cells proven to be mines.
    #[must_use]
    pub fn known_mines(&self) -> OrdSet<Cell> {
        self.known_mines.clone()
    }

    /// Cells proven safe.
    #[must_use]
    pub fn known_safe(&self) -> OrdSet<Cell> {
        self.known_safe.clone()
    }

    #[must_use]
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.known_mines.contains(&cell)
    }

    #[must_use]
    pub fn is_safe(&self, cell: Cell) -> bool {
        self.known_safe.contains(&cell)
    }

    #[must_use]
    pub fn is_played(&self, cell: Cell) -> bool {
        self.moves_made.contains(&cell)
    }

    /// Check if a cell's status is settled (mine or safe).
    #[must_use]
    pub fn is_resolved(&self, cell: Cell) -> bool {
        self.is_mine(cell) || self.is_safe(cell)
    }

    /// Live clauses.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Check if a structurally equal clause is live.
    #[must_use]
    pub fn contains_clause(&self, clause: &Clause) -> bool {
        self.index.get(&clause.sorted_cells()) == Some(&clause.count())
    }

    /// Immutable copy of the whole base.
    #[must_use]
    pub fn snapshot(&self) -> KnowledgeSnapshot {
        let mut clauses = self.clauses.clone();
        clauses.sort_by_cached_key(Clause::key);
        KnowledgeSnapshot {
            moves_made: self.moves_made.clone(),
            known_mines: self.known_mines.clone(),
            known_safe: self.known_safe.clone(),
            clauses,
        }
    }

    // === Mutation ===

    /// Record a probed cell. Returns `true` if it was not already recorded.
    pub fn record_move(&mut self, cell: Cell) -> bool {
        self.moves_made.insert(cell).is_none()
    }

    /// Mark `cell` as a mine and remove it from every clause.
    ///
    /// Returns `true` if the cell was not already a known mine. Marking an
    /// existing mine again is a no-op.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool> {
        if self.known_safe.contains(&cell) {
            return Err(KnowledgeError::ConflictingMark(cell));
        }
        self.rewrite_clauses(|clause| clause.mark_mine(cell))
            .map_err(|err| {
                trace!(%cell, error = %err, "mine mark rejected");
                err
            })?;
        Ok(self.known_mines.insert(cell).is_none())
    }

    /// Mark `cell` as safe and remove it from every clause.
    ///
    /// Returns `true` if the cell was not already known safe. Marking an
    /// existing safe cell again is a no-op.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool> {
        if self.known_mines.contains(&cell) {
            return Err(KnowledgeError::ConflictingMark(cell));
        }
        self.rewrite_clauses(|clause| clause.mark_safe(cell))
            .map_err(|err| {
                trace!(%cell, error = %err, "safe mark rejected");
                err
            })?;
        Ok(self.known_safe.insert(cell).is_none())
    }

    /// Add a clause unless a structurally equal one is already live.
    ///
    /// Resolved cells are folded in first, so the stored clause never
    /// mentions a known mine or known safe cell. Returns `true` if the
    /// clause was added; vacuous clauses are never added. A clause over the
    /// same cells as a live one but with another count is an error.
    pub fn insert_clause(&mut self, mut clause: Clause) -> Result<bool> {
        let resolved: Vec<Cell> = clause.cells().filter(|&c| self.is_resolved(c)).collect();
        for cell in resolved {
            if self.is_mine(cell) {
                clause.mark_mine(cell)?;
            } else {
                clause.mark_safe(cell)?;
            }
        }

        if clause.is_vacuous() || !index_clause(&mut self.index, &clause)? {
            return Ok(false);
        }
        trace!(%clause, "clause added");
        self.clauses.push(clause);
        Ok(true)
    }

    /// Forget everything. Used when a new game starts.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply `mark` to a copy of every clause, then drop vacuous clauses and
    /// merge clauses that became equal. Nothing is committed on error.
    fn rewrite_clauses<F>(&mut self, mut mark: F) -> Result<()>
    where
        F: FnMut(&mut Clause) -> Result<bool>,
    {
        let mut clauses = Vec::with_capacity(self.clauses.len());
        let mut index = ClauseIndex::default();
        for clause in &self.clauses {
            let mut clause = clause.clone();
            mark(&mut clause)?;
            if !clause.is_vacuous() && index_clause(&mut index, &clause)? {
                clauses.push(clause);
            }
        }
        self.clauses = clauses;
        self.index = index;
        Ok(())
    }

    // === Invariants ===

    /// Check every structural invariant of the base.
    ///
    /// Holds after every successful operation; exposed for tests and
    /// debugging callers.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let disjoint = self.known_mines.iter().all(|c| !self.known_safe.contains(c));
        let clauses_valid = self.clauses.iter().all(|clause| {
            !clause.is_vacuous()
                && clause.count() <= clause.len()
                && clause.cells().all(|c| !self.is_resolved(c))
        });
        // One entry per clause means no two clauses share a cell set.
        let indexed = self.index.len() == self.clauses.len()
            && self.clauses.iter().all(|c| self.contains_clause(c));
        disjoint && clauses_valid && indexed
    }
}

/// Register `clause` in `index`. Returns `false` if an equal clause is
/// already there.
fn index_clause(index: &mut ClauseIndex, clause: &Clause) -> Result<bool> {
    match index.entry(clause.sorted_cells()) {
        Entry::Vacant(entry) => {
            entry.insert(clause.count());
            Ok(true)
        }
        Entry::Occupied(entry) if *entry.get() == clause.count() => Ok(false),
        Entry::Occupied(entry) => Err(KnowledgeError::ConflictingClause {
            clause: clause.to_string(),
            live: *entry.get(),
        }),
    }
}
