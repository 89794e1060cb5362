//! Knowledge representation: clauses and the knowledge base that owns them.
//!
//! A `Clause` is one mine-count constraint. The `KnowledgeBase` holds the
//! live clauses together with the certainty sets and is the only place
//! those sets change.

pub mod clause;
pub mod base;
pub mod snapshot;

pub use clause::{Clause, ClauseKey};
pub use base::KnowledgeBase;
pub use snapshot::KnowledgeSnapshot;
