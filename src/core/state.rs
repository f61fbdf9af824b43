//! Round state.
//!
//! ## RoundState
//!
//! Everything the engine knows about the round in progress:
//! - Board size
//! - Matched pair count and matched positions
//! - The pending (face-up, unresolved) selection
//!
//! Card identities are never stored here. The matched set uses an `im`
//! persistent set so snapshots handed to renderers clone in O(1).

use im::OrdSet;
use serde::Serialize;
use smallvec::SmallVec;

use super::Position;

/// Cards currently face up and awaiting resolution.
///
/// Modelled as one enum so a second pending card can never exist without
/// a first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Pending {
    #[default]
    None,
    One(Position),
    Two(Position, Position),
}

impl Pending {
    #[must_use]
    pub fn first(self) -> Option<Position> {
        match self {
            Pending::None => None,
            Pending::One(first) | Pending::Two(first, _) => Some(first),
        }
    }

    #[must_use]
    pub fn second(self) -> Option<Position> {
        match self {
            Pending::Two(_, second) => Some(second),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        match self {
            Pending::None => false,
            Pending::One(first) => first == position,
            Pending::Two(first, second) => first == position || second == position,
        }
    }

    #[must_use]
    pub fn phase(self) -> Phase {
        match self {
            Pending::None => Phase::Idle,
            Pending::One(_) => Phase::OneSelected,
            Pending::Two(..) => Phase::PairPending,
        }
    }
}

/// Where the round sits in the selection cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// No card face up.
    Idle,
    /// One card face up, waiting for the second.
    OneSelected,
    /// Two cards face up, input locked until resolution.
    PairPending,
}

/// State of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundState {
    size: usize,
    matched_pairs: usize,
    matched: OrdSet<Position>,
    pending: Pending,
}

impl RoundState {
    /// Fresh round on a board of `size` cards.
    ///
    /// Size validation is the engine's job; this only builds the state.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            matched_pairs: 0,
            matched: OrdSet::new(),
            pending: Pending::None,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Pairs still face down.
    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.size / 2 - self.matched_pairs
    }

    #[must_use]
    pub fn matched_positions(&self) -> &OrdSet<Position> {
        &self.matched
    }

    #[must_use]
    pub fn is_matched(&self, position: Position) -> bool {
        self.matched.contains(&position)
    }

    #[must_use]
    pub fn pending(&self) -> Pending {
        self.pending
    }

    #[must_use]
    pub fn pending_first(&self) -> Option<Position> {
        self.pending.first()
    }

    #[must_use]
    pub fn pending_second(&self) -> Option<Position> {
        self.pending.second()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.pending.phase()
    }

    /// Whether a position should be drawn face up (matched or pending).
    #[must_use]
    pub fn is_face_up(&self, position: Position) -> bool {
        self.is_matched(position) || self.pending.contains(position)
    }

    /// Pending positions, in selection order.
    #[must_use]
    pub fn face_up_pending(&self) -> SmallVec<[Position; 2]> {
        let mut out = SmallVec::new();
        out.extend(self.pending.first());
        out.extend(self.pending.second());
        out
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.matched_pairs == self.size / 2
    }

    pub(crate) fn set_pending(&mut self, pending: Pending) {
        self.pending = pending;
    }

    pub(crate) fn record_match(&mut self, first: Position, second: Position) {
        self.matched.insert(first);
        self.matched.insert(second);
        self.matched_pairs += 1;
    }
}
