//! # minesweeper-kb
//!
//! A knowledge-based deduction engine for Minesweeper.
//!
//! The engine is fed observations (a probed cell and the number of mines
//! around it) and proves which other cells are mines or safe. It never
//! guesses: every conclusion follows from the observations seen so far.
//!
//! ## Design Principles
//!
//! 1. **Sound Only**: Cells are marked only when a clause forces them.
//!    Contradictory input is reported, never clamped.
//!
//! 2. **Fixed Point Per Call**: `observe` returns only after no further
//!    deduction is possible, so readers always see complete knowledge.
//!
//! 3. **Two-Phase Passes**: Each pass scans clauses read-only, then
//!    applies all marks and new clauses in bulk.
//!
//! ## Architecture
//!
//! - **Clauses**: "exactly N of these cells are mines", deduplicated by a
//!   canonical key (sorted cells + count).
//!
//! - **Persistent Data Structures**: Certainty sets use `im-rs` so
//!   accessors and snapshots hand out O(1) copies.
//!
//! - **Session-Scoped State**: Each `InferenceEngine` owns its knowledge
//!   base; independent games never share state.
//!
//! ## Modules
//!
//! - `core`: Cells, board geometry, configuration, RNG, errors
//! - `knowledge`: Clauses, the knowledge base, snapshots
//! - `inference`: The deduction engine and its shared handle
//! - `moves`: Safe and random move selection
//!
//! ## Example
//!
//! ```
//! use minesweeper_kb::{Cell, EngineConfig, InferenceEngine};
//!
//! let mut engine = InferenceEngine::new(EngineConfig::new(3, 3)).unwrap();
//!
//! // Corner (0,0) has exactly one mine among (0,1), (1,0), (1,1).
//! engine.observe(Cell::new(0, 0), 1).unwrap();
//! assert_eq!(engine.safe_move(), None);
//!
//! // Probing (0,1) and (1,1) reveals one mine next to each: it must be (1,0).
//! engine.observe(Cell::new(0, 1), 1).unwrap();
//! engine.observe(Cell::new(1, 1), 1).unwrap();
//! assert!(engine.known_mines().contains(&Cell::new(1, 0)));
//! ```

pub mod core;
pub mod knowledge;
pub mod inference;
pub mod moves;

// Re-export commonly used types
pub use crate::core::{
    Cell, Board,
    EngineConfig, InvalidConfig,
    KnowledgeError, Result,
    MoveRng, MoveRngState,
};

pub use crate::knowledge::{Clause, ClauseKey, KnowledgeBase, KnowledgeSnapshot};

pub use crate::inference::{DeductionStats, InferenceEngine, ObserveReport, SharedEngine};

pub use crate::moves::MoveSelector;
