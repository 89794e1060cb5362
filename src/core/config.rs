//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::board::Board;

/// Configuration for an inference session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Board columns (default: 8).
    pub width: usize,

    /// Board rows (default: 8).
    pub height: usize,

    /// Seed for random move selection.
    /// Same seed produces the same sequence of random moves.
    pub seed: u64,

    /// Maximum fixed-point passes per observation (0 = unlimited).
    /// The loop always terminates; this only bounds pathological boards.
    pub max_passes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            seed: 42,
            max_passes: 0,
        }
    }
}

/// Reason an `EngineConfig` was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("board must have at least one cell, got {width}x{height}")]
pub struct InvalidConfig {
    pub width: usize,
    pub height: usize,
}

impl EngineConfig {
    /// Create a config for a `width` by `height` board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom pass limit.
    pub fn with_max_passes(mut self, passes: u32) -> Self {
        self.max_passes = passes;
        self
    }

    /// Board geometry described by this config.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// Reject boards with no cells.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.width == 0 || self.height == 0 {
            return Err(InvalidConfig {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
