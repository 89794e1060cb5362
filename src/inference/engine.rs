//! The inference engine: turns observations into proven mines and safe cells.
//!
//! ## Observation Flow
//!
//! 1. The probed cell is recorded as played and marked safe.
//! 2. Its unresolved neighbors become a new clause (deduplicated).
//! 3. Passes run until one changes nothing:
//!    - direct inference collects every cell a clause forces, then marks
//!      them all;
//!    - subset inference collects `B - A` for every strict subset pair
//!      `A ⊂ B`, then inserts the new clauses.
//!
//! Each pass scans the clauses read-only and applies its results in bulk
//! afterwards, so no clause is mutated while it is being iterated.
//!
//! ## Contradictions
//!
//! Inconsistent input surfaces as a `KnowledgeError`. The engine restores
//! the knowledge base to its state before the failing call, so one bad
//! report never leaves half-applied deductions behind.
//!
//! ## Usage
//!
//! ```
//! use minesweeper_kb::core::{Cell, EngineConfig};
//! use minesweeper_kb::inference::InferenceEngine;
//!
//! let mut engine = InferenceEngine::new(EngineConfig::new(3, 3)).unwrap();
//! engine.observe(Cell::new(1, 1), 0).unwrap();
//!
//! assert_eq!(engine.known_safe().len(), 9);
//! assert_eq!(engine.safe_move(), Some(Cell::new(0, 0)));
//! ```

use im::OrdSet;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use super::stats::{DeductionStats, ObserveReport};
use crate::core::{Board, Cell, EngineConfig, InvalidConfig, KnowledgeError, MoveRng, Result};
use crate::knowledge::{Clause, KnowledgeBase, KnowledgeSnapshot};
use crate::moves::MoveSelector;

/// Which public update a transaction runs for.
#[derive(Clone, Copy, Debug)]
enum Update {
    Observe,
    Mark,
}

/// Deduction session for one board.
#[derive(Clone, Debug)]
pub struct InferenceEngine {
    config: EngineConfig,
    board: Board,
    kb: KnowledgeBase,
    rng: MoveRng,
    stats: DeductionStats,
}

impl InferenceEngine {
    /// Create an engine with empty knowledge.
    pub fn new(config: EngineConfig) -> std::result::Result<Self, InvalidConfig> {
        config.validate()?;
        Ok(Self {
            board: config.board(),
            rng: MoveRng::new(config.seed),
            kb: KnowledgeBase::new(),
            stats: DeductionStats::new(),
            config,
        })
    }

    /// Start a new game on the same board, keeping the configuration.
    pub fn reset(&mut self) {
        self.kb.clear();
        self.rng = MoveRng::new(self.config.seed);
        self.stats.reset();
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Read-only access to the knowledge base.
    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    #[must_use]
    pub fn stats(&self) -> &DeductionStats {
        &self.stats
    }

    /// Cells proven to be mines.
    #[must_use]
    pub fn known_mines(&self) -> OrdSet<Cell> {
        self.kb.known_mines()
    }

    /// Cells proven safe.
    #[must_use]
    pub fn known_safe(&self) -> OrdSet<Cell> {
        self.kb.known_safe()
    }

    /// Cells already probed.
    #[must_use]
    pub fn moves_made(&self) -> OrdSet<Cell> {
        self.kb.moves_made()
    }

    #[must_use]
    pub fn snapshot(&self) -> KnowledgeSnapshot {
        self.kb.snapshot()
    }

    // === Moves ===

    /// A proven-safe cell that has not been played.
    #[must_use]
    pub fn safe_move(&self) -> Option<Cell> {
        MoveSelector::new(&self.kb).safe_move()
    }

    /// A random unplayed cell that is not a known mine.
    pub fn random_move(&mut self) -> Option<Cell> {
        MoveSelector::new(&self.kb).random_move(self.board.width, self.board.height, &mut self.rng)
    }

    // === Knowledge Updates ===

    /// Incorporate the report that `cell` is safe and has `count` mines
    /// among its neighbors, then deduce to a fixed point.
    ///
    /// Observing the same cell again with the same count changes nothing;
    /// a different count is a contradiction.
    pub fn observe(&mut self, cell: Cell, count: usize) -> Result<ObserveReport> {
        debug!(%cell, count, "observe");
        self.transaction(Update::Observe, |engine, report| {
            engine.board.check(cell)?;
            if engine.kb.is_mine(cell) {
                return Err(KnowledgeError::ObservedKnownMine(cell));
            }

            engine.kb.record_move(cell);
            engine.kb.mark_safe(cell)?;

            let kb = &engine.kb;
            let neighborhood = engine
                .board
                .neighbors(cell)
                .filter(|&n| !kb.is_safe(n) && !kb.is_played(n));
            let clause = Clause::new(neighborhood, count)?;
            engine.kb.insert_clause(clause)?;

            engine.deduce(report)
        })
    }

    /// Incorporate an externally learned mine, then deduce to a fixed point.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<ObserveReport> {
        self.transaction(Update::Mark, |engine, report| {
            engine.board.check(cell)?;
            if engine.kb.mark_mine(cell)? {
                report.new_mines.push(cell);
            }
            engine.deduce(report)
        })
    }

    /// Incorporate an externally learned safe cell, then deduce to a fixed point.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<ObserveReport> {
        self.transaction(Update::Mark, |engine, report| {
            engine.board.check(cell)?;
            if engine.kb.mark_safe(cell)? {
                report.new_safe.push(cell);
            }
            engine.deduce(report)
        })
    }

    /// Run `update` against the knowledge base, rolling back on error.
    fn transaction<F>(&mut self, kind: Update, update: F) -> Result<ObserveReport>
    where
        F: FnOnce(&mut Self, &mut ObserveReport) -> Result<()>,
    {
        let checkpoint = self.kb.clone();
        let mut report = ObserveReport::default();

        match update(self, &mut report) {
            Ok(()) => {
                match kind {
                    Update::Observe => self.stats.record(&report),
                    Update::Mark => self.stats.record_mark(&report),
                }
                debug!(
                    passes = report.passes,
                    mines = report.new_mines.len(),
                    safe = report.new_safe.len(),
                    derived = report.clauses_derived,
                    clauses = self.kb.clauses().len(),
                    "fixed point reached"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "knowledge update rejected");
                self.kb = checkpoint;
                Err(err)
            }
        }
    }

    // === Fixed Point ===

    fn deduce(&mut self, report: &mut ObserveReport) -> Result<()> {
        loop {
            report.passes += 1;
            if self.config.max_passes != 0 && report.passes > self.config.max_passes {
                return Err(KnowledgeError::PassLimitExceeded(self.config.max_passes));
            }

            let marked = self.apply_direct_inference(report)?;
            let derived = self.apply_subset_inference()?;
            report.clauses_derived += derived;
            trace!(pass = report.passes, marked, derived, "pass complete");

            if marked == 0 && derived == 0 {
                return Ok(());
            }
        }
    }

    /// Mark every cell some clause forces. Returns how many marks were new.
    fn apply_direct_inference(&mut self, report: &mut ObserveReport) -> Result<u32> {
        let mut mines: FxHashSet<Cell> = FxHashSet::default();
        let mut safe: FxHashSet<Cell> = FxHashSet::default();
        for clause in self.kb.clauses() {
            mines.extend(clause.inferred_mines());
            safe.extend(clause.inferred_safe());
        }

        let mut mines: Vec<Cell> = mines.into_iter().collect();
        let mut safe: Vec<Cell> = safe.into_iter().collect();
        mines.sort_unstable();
        safe.sort_unstable();

        if let Some(&cell) = mines.iter().find(|&&c| safe.binary_search(&c).is_ok()) {
            return Err(KnowledgeError::ConflictingMark(cell));
        }

        let mut marked = 0;
        for cell in mines {
            if self.kb.mark_mine(cell)? {
                report.new_mines.push(cell);
                marked += 1;
            }
        }
        for cell in safe {
            if self.kb.mark_safe(cell)? {
                report.new_safe.push(cell);
                marked += 1;
            }
        }
        Ok(marked)
    }

    /// Derive `B - A` for every strict subset pair. Returns how many
    /// clauses were new.
    fn apply_subset_inference(&mut self) -> Result<u32> {
        let clauses = self.kb.clauses();
        let mut derived = Vec::new();
        for subset in clauses {
            for superset in clauses {
                if !subset.is_strict_subset_of(superset) {
                    continue;
                }
                let clause = subset.subtract_from(superset)?;
                if !self.kb.contains_clause(&clause) {
                    derived.push(clause);
                }
            }
        }

        let mut added = 0;
        for clause in derived {
            if self.kb.insert_clause(clause)? {
                added += 1;
            }
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    fn engine(width: usize, height: usize) -> InferenceEngine {
        InferenceEngine::new(EngineConfig::new(width, height)).unwrap()
    }

    #[test]
    fn test_rejects_empty_board() {
        assert!(InferenceEngine::new(EngineConfig::new(0, 0)).is_err());
    }

    #[test]
    fn test_zero_count_clears_neighbors() {
        let mut engine = engine(3, 3);
        let report = engine.observe(c(1, 1), 0).unwrap();

        assert_eq!(report.new_safe.len(), 8);
        assert!(report.new_mines.is_empty());
        assert_eq!(engine.known_safe().len(), 9);
        assert!(engine.knowledge().clauses().is_empty());
    }

    #[test]
    fn test_observed_cell_is_played_and_safe() {
        let mut engine = engine(4, 4);
        engine.observe(c(0, 0), 1).unwrap();

        assert!(engine.moves_made().contains(&c(0, 0)));
        assert!(engine.known_safe().contains(&c(0, 0)));
        assert_eq!(
            engine.knowledge().clauses(),
            &[Clause::new([c(0, 1), c(1, 0), c(1, 1)], 1).unwrap()]
        );
    }

    #[test]
    fn test_learned_safe_forces_mine() {
        let mut engine = engine(2, 2);
        engine.mark_safe(c(1, 1)).unwrap();
        engine.observe(c(0, 0), 1).unwrap();
        assert_eq!(
            engine.knowledge().clauses(),
            &[Clause::new([c(0, 1), c(1, 0)], 1).unwrap()]
        );

        let report = engine.mark_safe(c(0, 1)).unwrap();
        assert_eq!(report.new_safe, vec![c(0, 1)]);
        assert_eq!(report.new_mines, vec![c(1, 0)]);
        assert!(engine.known_mines().contains(&c(1, 0)));
        assert!(engine.knowledge().clauses().is_empty());
    }

    #[test]
    fn test_overlapping_observations_derive_safe_cells() {
        let mut engine = engine(3, 3);
        engine.observe(c(0, 0), 1).unwrap();

        // (0,1) leaves {(1,0),(1,1)} = 1 behind and adds
        // {(0,2),(1,0),(1,1),(1,2)} = 1, so (0,2) and (1,2) are safe.
        let report = engine.observe(c(0, 1), 1).unwrap();

        assert_eq!(report.new_safe, vec![c(0, 2), c(1, 2)]);
        assert!(report.new_mines.is_empty());
        assert_eq!(report.clauses_derived, 1);
        assert_eq!(report.passes, 3);
        assert_eq!(
            engine.knowledge().clauses(),
            &[Clause::new([c(1, 0), c(1, 1)], 1).unwrap()]
        );
    }

    #[test]
    fn test_subset_inference_derives_clause() {
        let mut engine = engine(5, 5);
        engine.kb.insert_clause(Clause::new([c(4, 0), c(4, 1), c(4, 2)], 1).unwrap()).unwrap();
        engine.kb.insert_clause(Clause::new([c(4, 0), c(4, 1)], 1).unwrap()).unwrap();

        let mut report = ObserveReport::default();
        engine.deduce(&mut report).unwrap();

        assert!(engine.known_safe().contains(&c(4, 2)));
        assert_eq!(report.clauses_derived, 1);
        assert_eq!(report.new_safe, vec![c(4, 2)]);
        assert!(engine.knowledge().is_consistent());
    }

    #[test]
    fn test_observe_known_mine_is_error() {
        let mut engine = engine(3, 3);
        engine.mark_mine(c(2, 2)).unwrap();

        assert_eq!(
            engine.observe(c(2, 2), 0),
            Err(KnowledgeError::ObservedKnownMine(c(2, 2)))
        );
    }

    #[test]
    fn test_observe_out_of_bounds() {
        let mut engine = engine(3, 3);
        assert!(matches!(
            engine.observe(c(3, 0), 0),
            Err(KnowledgeError::OutOfBounds { .. })
        ));
        assert!(engine.moves_made().is_empty());
    }

    #[test]
    fn test_count_exceeding_neighbors_is_error() {
        let mut engine = engine(3, 3);
        assert_eq!(
            engine.observe(c(0, 0), 4),
            Err(KnowledgeError::CountExceedsCells { count: 4, cells: 3 })
        );
    }

    #[test]
    fn test_contradiction_rolls_back() {
        let mut engine = engine(3, 3);
        engine.observe(c(0, 0), 3).unwrap();
        let before = engine.snapshot();

        // (0,1) and (1,1) are proven mines next to (0,2).
        let err = engine.observe(c(0, 2), 0).unwrap_err();
        assert!(err.is_contradiction());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_repeat_observation_is_quiet() {
        let mut engine = engine(4, 4);
        engine.observe(c(0, 0), 1).unwrap();
        let before = engine.snapshot();

        let report = engine.observe(c(0, 0), 1).unwrap();
        assert!(report.is_quiet());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_repeat_observation_with_new_count_is_error() {
        let mut engine = engine(4, 4);
        engine.observe(c(0, 0), 1).unwrap();
        let before = engine.snapshot();

        let err = engine.observe(c(0, 0), 2).unwrap_err();
        assert_eq!(
            err,
            KnowledgeError::ConflictingClause {
                clause: "{(0,1), (1,0), (1,1)} = 2".into(),
                live: 1,
            }
        );
        assert!(err.is_contradiction());
        assert_eq!(engine.snapshot(), before);
        assert!(engine.knowledge().is_consistent());
    }

    #[test]
    fn test_pass_limit() {
        let config = EngineConfig::new(5, 5).with_max_passes(1);
        let mut engine = InferenceEngine::new(config).unwrap();

        assert_eq!(
            engine.observe(c(2, 2), 0),
            Err(KnowledgeError::PassLimitExceeded(1))
        );
        assert!(engine.moves_made().is_empty());
    }

    #[test]
    fn test_stats_accumulate() {
        let mut engine = engine(3, 3);
        engine.observe(c(1, 1), 0).unwrap();

        assert_eq!(engine.stats().observations, 1);
        assert_eq!(engine.stats().safe_inferred, 8);
    }

    #[test]
    fn test_marks_not_counted_as_observations() {
        let mut engine = engine(3, 3);
        engine.mark_safe(c(0, 0)).unwrap();
        engine.mark_mine(c(2, 2)).unwrap();
        engine.observe(c(0, 0), 0).unwrap();

        let stats = engine.stats();
        assert_eq!(stats.observations, 1);
        assert_eq!(stats.marks, 2);
        assert_eq!(stats.mines_inferred, 1);
        // Each mark settles in one pass; the zero needs two.
        assert_eq!(stats.passes, 4);
        assert!((stats.avg_passes() - 4.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(3, 3);
        engine.observe(c(1, 1), 0).unwrap();
        engine.reset();

        assert!(engine.known_safe().is_empty());
        assert!(engine.moves_made().is_empty());
        assert_eq!(engine.stats().observations, 0);
    }

    #[test]
    fn test_random_move_reproducible_after_reset() {
        let mut engine = engine(6, 6);
        let first: Vec<_> = (0..5).map(|_| engine.random_move()).collect();
        engine.reset();
        let second: Vec<_> = (0..5).map(|_| engine.random_move()).collect();

        assert_eq!(first, second);
    }
}
