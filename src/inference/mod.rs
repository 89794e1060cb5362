//! Inference: folding observations into the knowledge base and deducing
//! to a fixed point.
//!
//! ## Components
//!
//! - `InferenceEngine`: single-owner session driving the deduction loop
//! - `SharedEngine`: lock-protected handle for multiple callers
//! - `ObserveReport` / `DeductionStats`: what each call (and the session)
//!   derived

pub mod engine;
pub mod shared;
pub mod stats;

pub use engine::InferenceEngine;
pub use shared::SharedEngine;
pub use stats::{DeductionStats, ObserveReport};
