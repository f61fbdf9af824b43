//! Timed memory game on top of `MatchEngine`.
//!
//! Mirrors the classic desktop game:
//! - Pick a level (50, 100 or 160 cards, 5/10/15 minutes)
//! - Flip two cards; a non-matching pair stays visible for a moment
//!   before turning back over
//! - Clear the board before the clock runs out
//!
//! The session owns the clock and the reveal delay. Whether a pair matched
//! and whether the board is cleared always come from the engine.

mod session;

pub use session::{
    CardView, MemorySession, MemorySessionBuilder, RoundOutcome, SessionEvent, SessionEvents,
    TimeRemaining,
};
