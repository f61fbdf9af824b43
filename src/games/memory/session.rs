//! Timed memory session.

use std::time::Duration;

use log::{debug, info};
use smallvec::SmallVec;

use crate::cards::{CardFace, Deck};
use crate::core::{DealRng, LevelConfig, Phase, Position};
use crate::engine::{MatchEngine, Resolution, Selection};
use crate::error::{EngineError, SessionError};

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Every pair matched within the time limit.
    Won,
    /// The clock ran out first.
    TimeUp,
}

/// Something that happened during `advance` or `resolve_now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The pending pair was compared.
    Resolved(Resolution),
    /// The last pair was matched.
    Won,
    /// The time limit was reached.
    TimeUp,
}

/// Events from a single call. Never more than resolve + win or timeout.
pub type SessionEvents = SmallVec<[SessionEvent; 3]>;

/// How a card should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardView<'a, I> {
    /// Card back.
    Hidden,
    /// Face up, waiting to be compared.
    FaceUp(&'a I),
    /// Face up for good.
    Matched(&'a I),
}

/// Remaining round time, displayed as `m:ss` rounded up to whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRemaining(pub Duration);

impl std::fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.0.as_secs() + u64::from(self.0.subsec_nanos() > 0);
        if secs == 0 {
            return write!(f, "Time's up!");
        }
        write!(f, "{}:{:02}", secs / 60, secs % 60)
    }
}

/// A level being played: engine, dealt deck, round clock and reveal timer.
///
/// All time comes from the caller through [`advance`](Self::advance); the
/// session never reads a clock. Matching and win state are read straight
/// from the engine.
#[derive(Clone, Debug)]
pub struct MemorySession<I> {
    level: LevelConfig,
    faces: Vec<I>,
    rng: DealRng,
    deck: Deck<I>,
    engine: MatchEngine,
    elapsed: Duration,
    /// Time the current pair has been face up.
    reveal_elapsed: Option<Duration>,
    outcome: Option<RoundOutcome>,
}

/// Builder for creating a MemorySession.
pub struct MemorySessionBuilder<I> {
    level: LevelConfig,
    faces: Vec<I>,
    seed: Option<u64>,
}

impl Default for MemorySessionBuilder<CardFace> {
    fn default() -> Self {
        Self {
            level: LevelConfig::level_1(),
            faces: CardFace::standard_deck(),
            seed: None,
        }
    }
}

impl MemorySessionBuilder<CardFace> {
    /// Builder for a standard playing-card session on level 1.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: Clone + Eq + std::hash::Hash> MemorySessionBuilder<I> {
    pub fn level(mut self, level: LevelConfig) -> Self {
        self.level = level;
        self
    }

    /// Replace the identity set cards are dealt from.
    pub fn faces<J>(self, faces: Vec<J>) -> MemorySessionBuilder<J> {
        MemorySessionBuilder {
            level: self.level,
            faces,
            seed: self.seed,
        }
    }

    /// Fix the deal seed. Unseeded sessions draw from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the level and deal the first board.
    pub fn build(self) -> Result<MemorySession<I>, SessionError> {
        self.level.validate()?;

        let mut rng = match self.seed {
            Some(seed) => DealRng::new(seed),
            None => DealRng::from_entropy(),
        };
        let deck = Deck::deal(self.level.card_count, &self.faces, &mut rng.fork())?;
        let engine = MatchEngine::new(self.level.card_count)?;

        info!(
            "session started: {} ({} cards, {}s)",
            self.level.name, self.level.card_count, self.level.time_limit_secs
        );

        Ok(MemorySession {
            level: self.level,
            faces: self.faces,
            rng,
            deck,
            engine,
            elapsed: Duration::ZERO,
            reveal_elapsed: None,
            outcome: None,
        })
    }
}

impl<I: Clone + Eq + std::hash::Hash> MemorySession<I> {
    /// Deal a fresh board for the current level and restart the clock.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.deck = Deck::deal(self.level.card_count, &self.faces, &mut self.rng.fork())?;
        self.engine.reset();
        self.elapsed = Duration::ZERO;
        self.reveal_elapsed = None;
        self.outcome = None;
        debug!("session reset: {}", self.level.name);
        Ok(())
    }

    /// Switch to another level and deal for it.
    ///
    /// On error the current round continues untouched.
    pub fn start_level(&mut self, level: LevelConfig) -> Result<(), SessionError> {
        level.validate()?;
        let deck = Deck::deal(level.card_count, &self.faces, &mut self.rng.fork())?;
        self.engine.start_round(level.card_count)?;

        info!("level started: {} ({} cards)", level.name, level.card_count);
        self.level = level;
        self.deck = deck;
        self.elapsed = Duration::ZERO;
        self.reveal_elapsed = None;
        self.outcome = None;
        Ok(())
    }
}

impl<I: PartialEq> MemorySession<I> {
    /// Turn a card face up.
    ///
    /// Ignored once the round is over. Completing a pair starts the reveal
    /// timer; the pair is compared once `advance` has covered the level's
    /// reveal delay.
    pub fn select(&mut self, position: Position) -> Result<Selection, EngineError> {
        if self.outcome.is_some() {
            return Ok(Selection::Ignored);
        }

        let selection = self.engine.select(position)?;
        if let Selection::PairReady(..) = selection {
            self.reveal_elapsed = Some(Duration::ZERO);
        }
        Ok(selection)
    }

    /// Move the round clock forward.
    ///
    /// Resolves the pending pair once it has been visible for the reveal
    /// delay, then checks for a win, then for the time limit.
    pub fn advance(&mut self, elapsed: Duration) -> Result<SessionEvents, EngineError> {
        let mut events = SessionEvents::new();
        if self.outcome.is_some() {
            return Ok(events);
        }

        self.elapsed = self.elapsed.saturating_add(elapsed);

        if let Some(shown) = self.reveal_elapsed {
            let shown = shown.saturating_add(elapsed);
            if shown >= self.level.reveal_delay() {
                self.resolve_into(&mut events)?;
            } else {
                self.reveal_elapsed = Some(shown);
            }
        }

        if self.outcome.is_none() && self.elapsed >= self.level.time_limit() {
            info!(
                "time up on {}: {} of {} pairs",
                self.level.name,
                self.engine.matched_pairs(),
                self.level.card_count / 2
            );
            self.outcome = Some(RoundOutcome::TimeUp);
            events.push(SessionEvent::TimeUp);
        }

        Ok(events)
    }

    /// Compare the pending pair now, without waiting out the reveal delay.
    pub fn resolve_now(&mut self) -> Result<SessionEvents, EngineError> {
        let mut events = SessionEvents::new();
        if self.outcome.is_none() {
            self.resolve_into(&mut events)?;
        }
        Ok(events)
    }

    fn resolve_into(&mut self, events: &mut SessionEvents) -> Result<(), EngineError> {
        let resolution = self.engine.resolve_pending(self.deck.lookup())?;
        self.reveal_elapsed = None;
        events.push(SessionEvent::Resolved(resolution));

        if self.engine.is_won() {
            info!("{} won in {:.1}s", self.level.name, self.elapsed.as_secs_f64());
            self.outcome = Some(RoundOutcome::Won);
            events.push(SessionEvent::Won);
        }
        Ok(())
    }

    /// How a card should be drawn right now.
    ///
    /// Positions off the board are reported as hidden.
    #[must_use]
    pub fn card_view(&self, position: Position) -> CardView<'_, I> {
        let Some(identity) = self.deck.get(position) else {
            return CardView::Hidden;
        };
        if self.engine.is_matched(position) {
            CardView::Matched(identity)
        } else if self.engine.is_face_up(position) {
            CardView::FaceUp(identity)
        } else {
            CardView::Hidden
        }
    }
}

impl<I> MemorySession<I> {
    #[must_use]
    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    #[must_use]
    pub fn deck(&self) -> &Deck<I> {
        &self.deck
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether input is locked waiting for the reveal timer.
    #[must_use]
    pub fn is_comparing(&self) -> bool {
        self.engine.phase() == Phase::PairPending
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn time_remaining(&self) -> TimeRemaining {
        TimeRemaining(self.level.time_limit().saturating_sub(self.elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_session(reveal_ms: u64) -> MemorySession<char> {
        let level = LevelConfig::new("Tiny", 4)
            .with_time_limit_secs(10)
            .with_columns(2)
            .with_reveal_delay_ms(reveal_ms);
        MemorySessionBuilder::new()
            .level(level)
            .faces(vec!['a', 'b'])
            .seed(3)
            .build()
            .unwrap()
    }

    /// First position and its partner, both still face down.
    fn find_pair(session: &MemorySession<char>) -> (Position, Position) {
        let first = Position::all(session.deck().len())
            .find(|&p| !session.engine().is_matched(p))
            .unwrap();
        (first, session.deck().partner_of(first).unwrap())
    }

    /// Two face-down positions with different identities.
    fn find_mismatch(session: &MemorySession<char>) -> (Position, Position) {
        let deck = session.deck();
        let first = Position::new(0);
        let other = Position::all(deck.len())
            .find(|&p| deck.identity(p) != deck.identity(first))
            .unwrap();
        (first, other)
    }

    #[test]
    fn test_build_deals_level() {
        let session = MemorySessionBuilder::new().seed(1).build().unwrap();
        assert_eq!(session.deck().len(), 50);
        assert_eq!(session.engine().size(), 50);
        assert_eq!(session.time_remaining().to_string(), "5:00");
        assert!(!session.is_over());
    }

    #[test]
    fn test_build_rejects_invalid_level() {
        let err = MemorySessionBuilder::new()
            .level(LevelConfig::new("Odd", 9))
            .build()
            .unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));

        let err = MemorySessionBuilder::new()
            .faces(Vec::<u8>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, SessionError::Deck(_)));
    }

    #[test]
    fn test_reveal_delay() {
        let mut session = small_session(1000);
        let (a, b) = find_mismatch(&session);

        session.select(a).unwrap();
        assert_eq!(session.select(b).unwrap(), Selection::PairReady(a, b));
        assert!(session.is_comparing());
        assert_eq!(session.card_view(b), CardView::FaceUp(session.deck().identity(b)));

        assert!(session.advance(Duration::from_millis(600)).unwrap().is_empty());
        assert!(session.is_comparing());

        let events = session.advance(Duration::from_millis(400)).unwrap();
        assert_eq!(
            events.as_slice(),
            &[SessionEvent::Resolved(Resolution::NotMatched { first: a, second: b })]
        );
        assert!(!session.is_comparing());
        assert_eq!(session.card_view(a), CardView::Hidden);
    }

    #[test]
    fn test_input_locked_while_comparing() {
        let mut session = small_session(1000);
        let (a, b) = find_mismatch(&session);
        session.select(a).unwrap();
        session.select(b).unwrap();

        let third = Position::all(4).find(|&p| p != a && p != b).unwrap();
        assert!(session.select(third).unwrap().is_ignored());
    }

    #[test]
    fn test_win() {
        let mut session = small_session(0);

        let (a, b) = find_pair(&session);
        session.select(a).unwrap();
        session.select(b).unwrap();
        let events = session.resolve_now().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(session.card_view(a), CardView::Matched(session.deck().identity(a)));

        let (c, d) = find_pair(&session);
        session.select(c).unwrap();
        session.select(d).unwrap();
        let events = session.advance(Duration::from_millis(1)).unwrap();
        assert_eq!(events.last(), Some(&SessionEvent::Won));
        assert_eq!(session.outcome(), Some(RoundOutcome::Won));

        // Round over: input and clock are frozen
        assert!(session.select(a).unwrap().is_ignored());
        assert!(session.advance(Duration::from_secs(60)).unwrap().is_empty());
    }

    #[test]
    fn test_time_up() {
        let mut session = small_session(1000);
        assert!(session.advance(Duration::from_secs(9)).unwrap().is_empty());
        assert_eq!(session.time_remaining().to_string(), "0:01");

        let events = session.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(events.as_slice(), &[SessionEvent::TimeUp]);
        assert_eq!(session.outcome(), Some(RoundOutcome::TimeUp));
        assert_eq!(session.time_remaining().to_string(), "Time's up!");
        assert!(session.select(Position::new(0)).unwrap().is_ignored());
    }

    #[test]
    fn test_reset_redeals() {
        let mut session = MemorySessionBuilder::new().seed(5).build().unwrap();
        let first_deal = session.deck().clone();

        session.select(Position::new(0)).unwrap();
        session.advance(Duration::from_secs(30)).unwrap();
        session.reset().unwrap();

        assert_ne!(session.deck(), &first_deal);
        assert_eq!(session.engine().phase(), Phase::Idle);
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn test_start_level() {
        let mut session = MemorySessionBuilder::new().seed(5).build().unwrap();
        session.start_level(LevelConfig::level_3()).unwrap();
        assert_eq!(session.deck().len(), 160);
        assert_eq!(session.engine().size(), 160);
        assert_eq!(session.time_remaining().to_string(), "15:00");

        assert!(session.start_level(LevelConfig::new("Bad", 3)).is_err());
        assert_eq!(session.level().card_count, 160);
    }

    #[test]
    fn test_time_remaining_display() {
        assert_eq!(TimeRemaining(Duration::from_secs(605)).to_string(), "10:05");
        assert_eq!(TimeRemaining(Duration::from_millis(900)).to_string(), "0:01");
        assert_eq!(TimeRemaining(Duration::ZERO).to_string(), "Time's up!");
    }
}
