//! Core types: cells, board geometry, configuration, RNG, errors.
//!
//! These are the building blocks shared by the knowledge base, the
//! inference engine and move selection.

pub mod cell;
pub mod board;
pub mod config;
pub mod error;
pub mod rng;

pub use cell::Cell;
pub use board::Board;
pub use config::{EngineConfig, InvalidConfig};
pub use error::{KnowledgeError, Result};
pub use rng::{MoveRng, MoveRngState};
