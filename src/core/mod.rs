//! Core types: positions, round state, RNG, level configuration.
//!
//! Nothing in here knows what a card looks like. Identities live in
//! `cards`; the state machine that drives `RoundState` lives in `engine`.

pub mod position;
pub mod rng;
pub mod config;
pub mod state;

pub use position::Position;
pub use rng::DealRng;
pub use config::{LevelConfig, DEFAULT_REVEAL_DELAY_MS};
pub use state::{Pending, Phase, RoundState};
