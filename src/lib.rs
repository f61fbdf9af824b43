//! # memory-match
//!
//! A tile-matching ("memory") puzzle engine.
//!
//! A board holds an even number of face-down cards, each identity placed on
//! exactly one pair of positions (or several pairs, when faces are reused).
//! The player turns two cards over at a time looking for a match.
//!
//! ## Design Principles
//!
//! 1. **Identity-Agnostic Core**: `MatchEngine` tracks positions only. What
//!    is printed on a card is supplied by the caller when a pair is resolved,
//!    and only compared with `==`.
//!
//! 2. **No Hidden Time**: Nothing sleeps or schedules. The "let the player see
//!    the second card" delay and the level time limit are driven by the caller
//!    through `MemorySession::advance`.
//!
//! 3. **Single Source of Truth**: Match and win state live in the engine.
//!    Renderers read it back through `RoundState` and `CardView`.
//!
//! ## Modules
//!
//! - `core`: Positions, round state, deal RNG, level configuration
//! - `engine`: The `MatchEngine` state machine
//! - `cards`: Card faces and dealt decks
//! - `games`: The timed memory session
//! - `error`: Error types

pub mod core;
pub mod engine;
pub mod cards;
pub mod games;
pub mod error;

// Re-export commonly used types
pub use crate::core::{DealRng, LevelConfig, Pending, Phase, Position, RoundState};

pub use crate::engine::{MatchEngine, Resolution, Selection};

pub use crate::cards::{CardFace, Deck, Rank, Suit};

pub use crate::games::memory::{
    CardView, MemorySession, MemorySessionBuilder, RoundOutcome, SessionEvent, SessionEvents,
    TimeRemaining,
};

pub use crate::error::{ConfigError, DeckError, EngineError, SessionError};
