use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;
use thiserror::Error;

pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck must contain {DECK_SIZE} cards but has {0}")]
    WrongSize(usize),
    #[error("card {0} appears more than once in the deck")]
    Duplicate(Card),
}

impl Deck {
    /// Clubs, Diamonds, Spades, Hearts; each from Two to Ace.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Accepts a caller-supplied order after checking it is a full deck.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(cards.len()));
        }
        let mut seen = Hand::new();
        for card in cards.iter().copied() {
            if !seen.add(card) {
                return Err(DeckError::Duplicate(card));
            }
        }
        Ok(Self { cards })
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck into four consecutive runs of thirteen; seat `i`
    /// receives `cards[13 * i..13 * (i + 1)]`.
    pub fn deal(&self) -> [Hand; 4] {
        array::from_fn(|seat| {
            self.cards[seat * HAND_SIZE..(seat + 1) * HAND_SIZE]
                .iter()
                .copied()
                .collect()
        })
    }
}

/// Supplies one deck per hand.
pub trait DeckSource {
    fn next_deck(&mut self) -> Deck;
}

/// Always yields [`Deck::standard`], which makes every deal reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedDecks;

impl DeckSource for SortedDecks {
    fn next_deck(&mut self) -> Deck {
        Deck::standard()
    }
}

/// Seeded shuffler; the same seed replays the same sequence of deals.
#[derive(Debug, Clone)]
pub struct ShuffledDecks {
    rng: StdRng,
}

impl ShuffledDecks {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DeckSource for ShuffledDecks {
    fn next_deck(&mut self) -> Deck {
        Deck::shuffled(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::{Deck, DeckError, DeckSource, ShuffledDecks, SortedDecks};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), 52);
        let unique: Hand = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn from_cards_rejects_short_and_duplicate_decks() {
        let mut cards = Deck::standard().cards().to_vec();
        cards.pop();
        assert_eq!(
            Deck::from_cards(cards.clone()),
            Err(DeckError::WrongSize(51))
        );

        cards.push(Card::TWO_OF_CLUBS);
        assert_eq!(
            Deck::from_cards(cards),
            Err(DeckError::Duplicate(Card::TWO_OF_CLUBS))
        );
    }

    #[test]
    fn deal_uses_consecutive_groups() {
        let hands = Deck::standard().deal();
        for hand in &hands {
            assert_eq!(hand.len(), 13);
        }
        assert!(hands[0].iter().all(|card| card.suit == Suit::Clubs));
        assert!(hands[3].iter().all(|card| card.suit == Suit::Hearts));
        assert!(hands[2].contains(Card::new(Rank::Queen, Suit::Spades)));
    }

    #[test]
    fn deck_sources_produce_full_decks() {
        let mut sorted = SortedDecks;
        assert_eq!(sorted.next_deck(), Deck::standard());

        let mut a = ShuffledDecks::with_seed(7);
        let mut b = ShuffledDecks::with_seed(7);
        let first = a.next_deck();
        assert_eq!(first, b.next_deck());
        assert!(Deck::from_cards(first.cards().to_vec()).is_ok());
        assert_ne!(a.next_deck(), first);
    }
}
