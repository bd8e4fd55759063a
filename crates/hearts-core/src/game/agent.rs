use crate::game::legal::legal_moves;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::history::GameHistory;
use crate::model::player::PlayerPosition;

/// What a seat sees when choosing its three passing cards.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub seat: PlayerPosition,
    /// The seat sends its cards to this position.
    pub target: PlayerPosition,
    pub hand: &'a Hand,
}

impl PassContext<'_> {
    /// Sorted by suit, then rank.
    pub fn sorted_hand(&self) -> Vec<Card> {
        self.hand.cards()
    }
}

/// What a seat sees when it is its turn to play.
#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub trick_so_far: &'a [Card],
    pub hearts_broken: bool,
    pub history: &'a GameHistory,
}

impl PlayContext<'_> {
    pub fn sorted_hand(&self) -> Vec<Card> {
        self.hand.cards()
    }

    pub fn is_first_trick(&self) -> bool {
        self.history.is_empty()
    }

    pub fn is_leading(&self) -> bool {
        self.trick_so_far.is_empty()
    }

    /// Same set the engine will check the chosen card against.
    pub fn legal_moves(&self) -> Vec<Card> {
        legal_moves(
            self.hand,
            self.trick_so_far,
            self.hearts_broken,
            self.is_first_trick(),
        )
    }
}

/// Decision-making capability plugged into each seat.
///
/// The engine validates every answer: a pass must be three distinct cards
/// from the seat's hand, a play must be one of [`PlayContext::legal_moves`].
/// Anything else aborts the hand.
pub trait Agent: Send {
    fn name(&self) -> &str {
        "agent"
    }

    fn choose_cards_to_pass(&mut self, ctx: &PassContext<'_>) -> [Card; 3];

    fn play(&mut self, ctx: &PlayContext<'_>) -> Card;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_cards_to_pass(&mut self, ctx: &PassContext<'_>) -> [Card; 3] {
        (**self).choose_cards_to_pass(ctx)
    }

    fn play(&mut self, ctx: &PlayContext<'_>) -> Card {
        (**self).play(ctx)
    }
}

/// One agent per seat, indexed by [`PlayerPosition::index`].
pub type Seats = [Box<dyn Agent>; 4];
