//! Card identities and dealt decks.
//!
//! ## Key Types
//!
//! - `CardFace`: One of the 52 standard playing-card faces
//! - `Deck`: Shuffled identity layout of a board, also the identity lookup
//!
//! The engine accepts any `PartialEq` identity; `CardFace` is just the one
//! the built-in levels deal from.

pub mod deck;
pub mod face;

pub use deck::Deck;
pub use face::{CardFace, Rank, Suit};
