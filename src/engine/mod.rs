//! Match engine: the memory game's state machine.
//!
//! `MatchEngine` owns:
//! - The board size
//! - Which positions are matched, and how many pairs
//! - Which cards are face up awaiting comparison
//!
//! It never stores card identities, never waits, and never renders.
//! Callers drive it through `select` and `resolve_pending`, and read
//! back `Selection` / `Resolution` outcomes.

pub mod match_engine;

pub use match_engine::{MatchEngine, Resolution, Selection};
