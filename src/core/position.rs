//! Board positions.
//!
//! A `Position` names one slot on the board, `0..size`, laid out row-major
//! by the presentation layer. It says nothing about which card identity sits
//! there; that lives in a [`Deck`](crate::cards::Deck) or whatever lookup
//! the caller passes to `resolve_pending`.
//!
//! ```
//! use memory_match::core::Position;
//!
//! let p = Position::new(7);
//! assert_eq!(p.index(), 7);
//! assert!(p.is_on_board(8));
//! assert!(!p.is_on_board(7));
//! ```

use serde::{Deserialize, Serialize};

/// Index of a single board slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub usize);

impl Position {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Check if this position exists on a board of `size` cards.
    #[must_use]
    pub const fn is_on_board(self, size: usize) -> bool {
        self.0 < size
    }

    /// Iterate every position of a board of `size` cards.
    pub fn all(size: usize) -> impl Iterator<Item = Position> {
        (0..size).map(Position)
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
