use crate::model::card::Card;
use crate::model::suit::Suit;

/// A seat's cards as a 52-bit set indexed by [`Card::index`].
///
/// Iteration yields cards sorted by suit and then rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hand {
    bits: u64,
}

impl Hand {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn with_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut hand = Self::new();
        for card in cards {
            hand.add(card);
        }
        hand
    }

    /// Returns `false` when the card was already present.
    pub fn add(&mut self, card: Card) -> bool {
        let mask = Self::mask(card);
        let fresh = self.bits & mask == 0;
        self.bits |= mask;
        fresh
    }

    /// Returns `false` when the card was not in the hand.
    pub fn remove(&mut self, card: Card) -> bool {
        let mask = Self::mask(card);
        let present = self.bits & mask != 0;
        self.bits &= !mask;
        present
    }

    pub fn contains(&self, card: Card) -> bool {
        self.bits & Self::mask(card) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        let bits = self.bits;
        (0..52)
            .filter(move |index| bits & (1u64 << index) != 0)
            .filter_map(Card::from_index)
    }

    /// Sorted snapshot handed to agents.
    pub fn cards(&self) -> Vec<Card> {
        self.iter().collect()
    }

    pub fn cards_of_suit(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.iter().filter(move |card| card.suit == suit)
    }

    const fn mask(card: Card) -> u64 {
        1u64 << card.index()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand::with_cards(iter)
    }
}
