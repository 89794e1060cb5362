//! Shared fixtures for integration tests.
//!
//! `MineField` plays the part of the external board: it knows where the
//! mines are and answers probes with neighbor counts.

#![allow(dead_code)]

use std::collections::BTreeSet;

use minesweeper_kb::{Board, Cell, InferenceEngine};

/// Ground-truth board built from an ASCII layout (`*` = mine, `.` = clear).
#[derive(Clone, Debug)]
pub struct MineField {
    pub board: Board,
    pub mines: BTreeSet<Cell>,
}

impl MineField {
    pub fn parse(layout: &str) -> Self {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.len());
        let mut mines = BTreeSet::new();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), width, "ragged layout row {row}");
            for (col, ch) in line.chars().enumerate() {
                if ch == '*' {
                    mines.insert(Cell::new(row, col));
                }
            }
        }
        Self {
            board: Board::new(width, rows.len()),
            mines,
        }
    }

    pub fn from_mines(board: Board, mines: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            board,
            mines: mines.into_iter().filter(|&c| board.contains(c)).collect(),
        }
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.board.neighbors(cell).filter(|&n| self.is_mine(n)).count()
    }

    /// Probe `cell` and feed the result to the engine.
    pub fn reveal(&self, engine: &mut InferenceEngine, cell: Cell) {
        assert!(!self.is_mine(cell), "probed a mine at {cell}");
        engine
            .observe(cell, self.count(cell))
            .unwrap_or_else(|err| panic!("consistent observation of {cell} rejected: {err}"));
    }

    /// Assert every conclusion the engine holds matches the ground truth.
    pub fn assert_sound(&self, engine: &InferenceEngine) {
        for cell in engine.known_mines() {
            assert!(self.is_mine(cell), "{cell} marked as mine but is clear");
        }
        for cell in engine.known_safe() {
            assert!(!self.is_mine(cell), "{cell} marked safe but is a mine");
        }
        assert!(engine.knowledge().is_consistent());
    }
}

/// Outcome of letting the engine drive a game.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every clear cell was probed.
    Cleared,
    /// A random move hit a mine.
    HitMine(Cell),
}

/// Play using safe moves first and random moves as fallback.
pub fn autoplay(field: &MineField, engine: &mut InferenceEngine) -> Outcome {
    let clear = field.board.cell_count() - field.mines.len();
    while engine.moves_made().len() < clear {
        let Some(cell) = engine.safe_move().or_else(|| engine.random_move()) else {
            break;
        };
        if field.is_mine(cell) {
            return Outcome::HitMine(cell);
        }
        field.reveal(engine, cell);
        field.assert_sound(engine);
    }
    Outcome::Cleared
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
