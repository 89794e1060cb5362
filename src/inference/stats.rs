//! Deduction statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

use crate::core::Cell;

/// What a single `observe` call derived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserveReport {
    /// Cells newly proven to be mines, in the order they were marked.
    pub new_mines: Vec<Cell>,

    /// Cells newly proven safe (excluding the observed cell itself).
    pub new_safe: Vec<Cell>,

    /// Clauses added by subset inference.
    pub clauses_derived: u32,

    /// Fixed-point passes run, including the final pass that changed nothing.
    pub passes: u32,
}

impl ObserveReport {
    /// Check if the observation taught nothing beyond its own clause.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.new_mines.is_empty() && self.new_safe.is_empty() && self.clauses_derived == 0
    }
}

/// Statistics accumulated over a session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeductionStats {
    /// Observations incorporated.
    pub observations: u32,

    /// Externally learned mines and safe cells incorporated.
    pub marks: u32,

    /// Fixed-point passes across all updates.
    pub passes: u32,

    /// Longest fixed-point loop seen in one update.
    pub max_passes: u32,

    /// Mines proven.
    pub mines_inferred: u32,

    /// Safe cells proven.
    pub safe_inferred: u32,

    /// Clauses added by subset inference.
    pub clauses_derived: u32,
}

impl DeductionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold one observation's report into the totals.
    pub fn record(&mut self, report: &ObserveReport) {
        self.observations += 1;
        self.accumulate(report);
    }

    /// Fold the report of an external mark into the totals.
    pub fn record_mark(&mut self, report: &ObserveReport) {
        self.marks += 1;
        self.accumulate(report);
    }

    /// Total updates (observations plus marks).
    #[must_use]
    pub fn updates(&self) -> u32 {
        self.observations + self.marks
    }

    fn accumulate(&mut self, report: &ObserveReport) {
        self.passes += report.passes;
        self.max_passes = self.max_passes.max(report.passes);
        self.mines_inferred += report.new_mines.len() as u32;
        self.safe_inferred += report.new_safe.len() as u32;
        self.clauses_derived += report.clauses_derived;
    }

    /// Calculate average passes per update.
    #[must_use]
    pub fn avg_passes(&self) -> f64 {
        if self.updates() == 0 {
            0.0
        } else {
            self.passes as f64 / self.updates() as f64
        }
    }
}
