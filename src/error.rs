//! Error types.
//!
//! Every error here is a caller contract violation. Ordinary input timing
//! (clicking a matched card, clicking while a pair is pending) is never an
//! error; the engine reports it as `Selection::Ignored`.

use crate::core::Position;

/// Errors raised by [`MatchEngine`](crate::engine::MatchEngine).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("board size must be a positive even number, got {0}")]
    InvalidSize(usize),

    #[error("no pending pair to resolve")]
    NoPendingPair,

    #[error("position {position} is outside a board of {size} cards")]
    PositionOutOfRange { position: Position, size: usize },
}

/// Errors raised while building a [`Deck`](crate::cards::Deck).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("deck size must be a positive even number, got {0}")]
    InvalidSize(usize),

    #[error("cannot deal a deck from an empty face set")]
    NoFaces,

    #[error("card at {0} has no matching partner")]
    UnpairedIdentity(Position),
}

/// Errors raised by [`LevelConfig::validate`](crate::core::LevelConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("level '{name}': card count must be a positive even number, got {count}")]
    InvalidCardCount { name: String, count: usize },

    #[error("level '{0}': grid needs at least one column")]
    ZeroColumns(String),

    #[error("level '{0}': time limit must be greater than zero")]
    ZeroTimeLimit(String),
}

/// Errors raised by [`MemorySession`](crate::games::memory::MemorySession).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("deck error: {0}")]
    Deck(#[from] DeckError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
