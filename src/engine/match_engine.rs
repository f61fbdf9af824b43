//! The match engine.
//!
//! Drives one `RoundState` through the selection cycle:
//!
//! ```text
//! Idle --select--> OneSelected --select--> PairPending --resolve--> Idle
//! ```
//!
//! The engine is identity-agnostic. Whatever sits at a position is supplied
//! by the caller at resolution time as a lookup closure, and only compared
//! with `==`.

use log::{debug, info, trace};

use crate::core::{Pending, Phase, Position, RoundState};
use crate::error::EngineError;

/// Result of a `select` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed: the card is matched, already face up, or a pair
    /// is waiting to be resolved.
    Ignored,
    /// First card of a pair is face up.
    FirstShown(Position),
    /// Second card is face up; the pair must now be resolved.
    PairReady(Position, Position),
}

impl Selection {
    #[must_use]
    pub fn is_ignored(self) -> bool {
        matches!(self, Selection::Ignored)
    }
}

/// Result of resolving a pending pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Both cards stay face up for the rest of the round.
    Matched { first: Position, second: Position },
    /// Both cards go back face down.
    NotMatched { first: Position, second: Position },
}

impl Resolution {
    #[must_use]
    pub fn is_match(self) -> bool {
        matches!(self, Resolution::Matched { .. })
    }

    /// The two resolved positions, in selection order.
    #[must_use]
    pub fn positions(self) -> (Position, Position) {
        match self {
            Resolution::Matched { first, second } | Resolution::NotMatched { first, second } => {
                (first, second)
            }
        }
    }
}

/// Game-state machine for a single memory board.
///
/// ## Example
///
/// ```
/// use memory_match::core::Position;
/// use memory_match::engine::{MatchEngine, Resolution, Selection};
///
/// let faces = ['A', 'B', 'A', 'B'];
/// let mut engine = MatchEngine::new(4).unwrap();
///
/// engine.select(Position::new(0)).unwrap();
/// let ready = engine.select(Position::new(2)).unwrap();
/// assert_eq!(ready, Selection::PairReady(Position::new(0), Position::new(2)));
///
/// let result = engine.resolve_pending(|p| faces[p.index()]).unwrap();
/// assert!(result.is_match());
/// assert_eq!(engine.matched_pairs(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    state: RoundState,
}

impl MatchEngine {
    /// Create an engine with a round already started on `size` cards.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        check_size(size)?;
        info!("starting round with {} cards", size);
        Ok(Self {
            state: RoundState::new(size),
        })
    }

    /// Start a new round on `size` cards, discarding the current one.
    ///
    /// On error the current round is left as it was.
    pub fn start_round(&mut self, size: usize) -> Result<(), EngineError> {
        check_size(size)?;
        info!("starting round with {} cards", size);
        self.state = RoundState::new(size);
        Ok(())
    }

    /// Restart the round on the same board size.
    pub fn reset(&mut self) {
        debug!("resetting round of {} cards", self.state.size());
        self.state = RoundState::new(self.state.size());
    }

    /// Turn a card face up.
    ///
    /// Matched cards, the card already face up, and any card while a pair
    /// is pending are ignored. Positions off the board are an error.
    pub fn select(&mut self, position: Position) -> Result<Selection, EngineError> {
        let size = self.state.size();
        if !position.is_on_board(size) {
            return Err(EngineError::PositionOutOfRange { position, size });
        }

        if self.state.is_matched(position) {
            trace!("ignoring {}: already matched", position);
            return Ok(Selection::Ignored);
        }

        let selection = match self.state.pending() {
            Pending::None => {
                self.state.set_pending(Pending::One(position));
                Selection::FirstShown(position)
            }
            Pending::One(first) if first == position => {
                trace!("ignoring {}: already face up", position);
                return Ok(Selection::Ignored);
            }
            Pending::One(first) => {
                self.state.set_pending(Pending::Two(first, position));
                Selection::PairReady(first, position)
            }
            Pending::Two(..) => {
                trace!("ignoring {}: pair pending", position);
                return Ok(Selection::Ignored);
            }
        };

        debug!("selected {} ({:?})", position, self.state.phase());
        Ok(selection)
    }

    /// Compare the two pending cards and clear the pending pair.
    ///
    /// `lookup` maps a position to the identity printed on it and must be
    /// defined for every position on the board.
    pub fn resolve_pending<I, F>(&mut self, lookup: F) -> Result<Resolution, EngineError>
    where
        F: Fn(Position) -> I,
        I: PartialEq,
    {
        let Pending::Two(first, second) = self.state.pending() else {
            return Err(EngineError::NoPendingPair);
        };

        self.state.set_pending(Pending::None);

        let resolution = if lookup(first) == lookup(second) {
            self.state.record_match(first, second);
            Resolution::Matched { first, second }
        } else {
            Resolution::NotMatched { first, second }
        };

        debug!(
            "resolved {} / {}: {} ({} of {} pairs)",
            first,
            second,
            if resolution.is_match() { "match" } else { "no match" },
            self.state.matched_pairs(),
            self.state.size() / 2
        );
        if self.state.is_won() {
            info!("board of {} cards cleared", self.state.size());
        }

        Ok(resolution)
    }

    /// Check if every pair has been matched.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    // === Accessors ===

    /// Snapshot of the current round.
    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.state.size()
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.state.matched_pairs()
    }

    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.state.remaining_pairs()
    }

    #[must_use]
    pub fn matched_positions(&self) -> &im::OrdSet<Position> {
        self.state.matched_positions()
    }

    #[must_use]
    pub fn is_matched(&self, position: Position) -> bool {
        self.state.is_matched(position)
    }

    #[must_use]
    pub fn is_face_up(&self, position: Position) -> bool {
        self.state.is_face_up(position)
    }

    #[must_use]
    pub fn pending_first(&self) -> Option<Position> {
        self.state.pending_first()
    }

    #[must_use]
    pub fn pending_second(&self) -> Option<Position> {
        self.state.pending_second()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }
}

fn check_size(size: usize) -> Result<(), EngineError> {
    if size == 0 || size % 2 != 0 {
        return Err(EngineError::InvalidSize(size));
    }
    Ok(())
}
