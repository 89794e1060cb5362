//! Serializable view of a knowledge base, for UIs and debugging.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::clause::Clause;
use crate::core::Cell;

/// Point-in-time copy of a `KnowledgeBase`.
///
/// Clauses are sorted by canonical key so two snapshots of equal
/// knowledge compare and serialize identically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    pub moves_made: OrdSet<Cell>,
    pub known_mines: OrdSet<Cell>,
    pub known_safe: OrdSet<Cell>,
    pub clauses: Vec<Clause>,
}

impl KnowledgeSnapshot {
    /// Safe cells that have not been played yet.
    pub fn pending_safe(&self) -> impl Iterator<Item = Cell> + '_ {
        self.known_safe.iter().copied().filter(move |c| !self.moves_made.contains(c))
    }
}

impl std::fmt::Display for KnowledgeSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "moves: {}, mines: {}, safe: {}",
            self.moves_made.len(),
            self.known_mines.len(),
            self.known_safe.len()
        )?;
        for clause in &self.clauses {
            writeln!(f, "  {}", clause)?;
        }
        Ok(())
    }
}
