//! Move selection: proven-safe moves first, random fallback second.

pub mod selector;

pub use selector::MoveSelector;
