//! Dealt decks.
//!
//! A `Deck` is the identity layout of one board: which face sits at which
//! position. It is what the presentation layer hands to
//! `MatchEngine::resolve_pending` via [`Deck::lookup`].
//!
//! ## Dealing
//!
//! `Deck::deal(size, faces, rng)` needs `size / 2` identities. It takes them
//! from the front of `faces`, starting over from the front when there are
//! fewer faces than pairs (a 160-card board from 52 faces uses some faces
//! twice). Each identity is placed twice and the whole layout is shuffled.
//!
//! ```
//! use memory_match::cards::{CardFace, Deck};
//! use memory_match::core::DealRng;
//!
//! let mut rng = DealRng::new(7);
//! let deck = Deck::deal(160, &CardFace::standard_deck(), &mut rng).unwrap();
//! assert_eq!(deck.len(), 160);
//! ```

use std::hash::Hash;

use log::debug;
use rustc_hash::FxHashMap;

use crate::core::{DealRng, Position};
use crate::error::DeckError;

/// Card identities by board position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck<I> {
    cards: Vec<I>,
}

impl<I: Clone + Eq + Hash> Deck<I> {
    /// Deal a shuffled board of `size` cards from `faces`.
    pub fn deal(size: usize, faces: &[I], rng: &mut DealRng) -> Result<Self, DeckError> {
        if size == 0 || size % 2 != 0 {
            return Err(DeckError::InvalidSize(size));
        }
        if faces.is_empty() {
            return Err(DeckError::NoFaces);
        }

        let pairs = size / 2;
        let mut cards: Vec<I> = faces.iter().cycle().take(pairs).cloned().collect();
        cards.extend_from_within(..);
        rng.shuffle(&mut cards);

        debug!(
            "dealt {} cards from {} faces ({} reused)",
            size,
            faces.len(),
            pairs.saturating_sub(faces.len())
        );
        Ok(Self { cards })
    }

    /// Use a caller-arranged layout.
    ///
    /// Every identity must occur an even number of times so the board can
    /// be cleared.
    pub fn from_cards(cards: Vec<I>) -> Result<Self, DeckError> {
        if cards.is_empty() || cards.len() % 2 != 0 {
            return Err(DeckError::InvalidSize(cards.len()));
        }

        // Track the last position of each identity whose count is odd
        let mut unpaired: FxHashMap<&I, Option<usize>> = FxHashMap::default();
        for (index, card) in cards.iter().enumerate() {
            let slot = unpaired.entry(card).or_insert(None);
            *slot = if slot.is_some() { None } else { Some(index) };
        }
        if let Some(index) = unpaired.values().flatten().min() {
            return Err(DeckError::UnpairedIdentity(Position::new(*index)));
        }

        Ok(Self { cards })
    }
}

impl<I> Deck<I> {
    /// Identity at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is off the board.
    #[must_use]
    pub fn identity(&self, position: Position) -> &I {
        &self.cards[position.index()]
    }

    /// Identity at `position`, or `None` if off the board.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&I> {
        self.cards.get(position.index())
    }

    /// Position-to-identity lookup for `MatchEngine::resolve_pending`.
    pub fn lookup<'a>(&'a self) -> impl Fn(Position) -> &'a I + 'a {
        move |position| self.identity(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate `(position, identity)` in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &I)> {
        self.cards.iter().enumerate().map(|(i, card)| (Position::new(i), card))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[I] {
        &self.cards
    }
}

impl<I: PartialEq> Deck<I> {
    /// First other position holding the same identity as `position`.
    #[must_use]
    pub fn partner_of(&self, position: Position) -> Option<Position> {
        let target = self.get(position)?;
        self.iter()
            .find(|(other, card)| *other != position && *card == target)
            .map(|(other, _)| other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardFace;

    fn counts<I: Eq + Hash>(deck: &Deck<I>) -> FxHashMap<&I, usize> {
        let mut counts = FxHashMap::default();
        for (_, card) in deck.iter() {
            *counts.entry(card).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_deal_pairs_every_face() {
        let mut rng = DealRng::new(42);
        let deck = Deck::deal(50, &CardFace::standard_deck(), &mut rng).unwrap();

        assert_eq!(deck.len(), 50);
        let counts = counts(&deck);
        assert_eq!(counts.len(), 25);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_deal_reuses_faces() {
        let mut rng = DealRng::new(42);
        let faces = CardFace::standard_deck();
        let deck = Deck::deal(160, &faces, &mut rng).unwrap();

        let counts = counts(&deck);
        assert_eq!(counts.len(), 52);
        // 80 pairs from 52 faces: the first 28 faces appear twice over
        assert_eq!(counts[&faces[0]], 4);
        assert_eq!(counts[&faces[27]], 4);
        assert_eq!(counts[&faces[28]], 2);
        assert!(counts.values().all(|&n| n % 2 == 0));
    }

    #[test]
    fn test_deal_is_deterministic() {
        let faces: Vec<u8> = (0..10).collect();
        let a = Deck::deal(20, &faces, &mut DealRng::new(9)).unwrap();
        let b = Deck::deal(20, &faces, &mut DealRng::new(9)).unwrap();
        let c = Deck::deal(20, &faces, &mut DealRng::new(10)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_deal_errors() {
        let mut rng = DealRng::new(1);
        assert_eq!(Deck::deal(7, &[1, 2], &mut rng), Err(DeckError::InvalidSize(7)));
        assert_eq!(Deck::deal(0, &[1, 2], &mut rng), Err(DeckError::InvalidSize(0)));
        assert_eq!(Deck::<u8>::deal(4, &[], &mut rng), Err(DeckError::NoFaces));
    }

    #[test]
    fn test_from_cards() {
        let deck = Deck::from_cards(vec!['a', 'b', 'b', 'a']).unwrap();
        assert_eq!(*deck.identity(Position::new(1)), 'b');
        assert_eq!(deck.get(Position::new(4)), None);

        // Four of a kind is still solvable
        assert!(Deck::from_cards(vec![1, 1, 1, 1]).is_ok());

        assert_eq!(
            Deck::from_cards(vec!['a', 'b', 'c', 'a']),
            Err(DeckError::UnpairedIdentity(Position::new(1)))
        );
        assert_eq!(Deck::from_cards(vec!['a']), Err(DeckError::InvalidSize(1)));
        assert_eq!(Deck::<char>::from_cards(vec![]), Err(DeckError::InvalidSize(0)));
    }

    #[test]
    fn test_partner_of() {
        let deck = Deck::from_cards(vec![3, 5, 5, 3]).unwrap();
        assert_eq!(deck.partner_of(Position::new(0)), Some(Position::new(3)));
        assert_eq!(deck.partner_of(Position::new(2)), Some(Position::new(1)));
        assert_eq!(deck.partner_of(Position::new(9)), None);
    }

    #[test]
    fn test_lookup_drives_engine() {
        use crate::engine::MatchEngine;

        let deck = Deck::from_cards(vec!['x', 'y', 'x', 'y']).unwrap();
        let mut engine = MatchEngine::new(deck.len()).unwrap();
        engine.select(Position::new(1)).unwrap();
        engine.select(Position::new(3)).unwrap();

        assert!(engine.resolve_pending(deck.lookup()).unwrap().is_match());
    }
}
