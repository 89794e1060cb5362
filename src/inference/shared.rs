//! Thread-safe handle to an inference session.
//!
//! One `RwLock` guards the whole engine, including its move RNG. `observe`
//! and the mark methods hold the write lock for the full fixed-point loop,
//! so readers never see a half-deduced state. `safe_move` and the accessors
//! take the read lock; `random_move` advances the RNG and takes the write
//! lock.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use im::OrdSet;

use super::engine::InferenceEngine;
use super::stats::ObserveReport;
use crate::core::{Cell, EngineConfig, InvalidConfig, Result};
use crate::knowledge::KnowledgeSnapshot;

/// Cloneable, shareable inference session.
#[derive(Clone, Debug)]
pub struct SharedEngine {
    engine: Arc<RwLock<InferenceEngine>>,
}

impl SharedEngine {
    pub fn new(config: EngineConfig) -> std::result::Result<Self, InvalidConfig> {
        Ok(Self::from_engine(InferenceEngine::new(config)?))
    }

    /// Wrap an existing engine. Its knowledge, stats and RNG state carry over.
    #[must_use]
    pub fn from_engine(engine: InferenceEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    // A panic elsewhere cannot leave knowledge half-applied (updates roll
    // back before returning), so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, InferenceEngine> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InferenceEngine> {
        self.engine.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn observe(&self, cell: Cell, count: usize) -> Result<ObserveReport> {
        self.write().observe(cell, count)
    }

    pub fn mark_mine(&self, cell: Cell) -> Result<ObserveReport> {
        self.write().mark_mine(cell)
    }

    pub fn mark_safe(&self, cell: Cell) -> Result<ObserveReport> {
        self.write().mark_safe(cell)
    }

    /// Start a new game. The RNG is reseeded from the config.
    pub fn reset(&self) {
        self.write().reset();
    }

    #[must_use]
    pub fn safe_move(&self) -> Option<Cell> {
        self.read().safe_move()
    }

    pub fn random_move(&self) -> Option<Cell> {
        self.write().random_move()
    }

    #[must_use]
    pub fn known_mines(&self) -> OrdSet<Cell> {
        self.read().known_mines()
    }

    #[must_use]
    pub fn known_safe(&self) -> OrdSet<Cell> {
        self.read().known_safe()
    }

    #[must_use]
    pub fn moves_made(&self) -> OrdSet<Cell> {
        self.read().moves_made()
    }

    #[must_use]
    pub fn snapshot(&self) -> KnowledgeSnapshot {
        self.read().snapshot()
    }
}
