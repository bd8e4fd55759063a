use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Loading replays every play through [`Trick::play`], so stored tricks obey
/// the same turn order as live ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTrick")]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Deserialize)]
struct StoredTrick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

impl TryFrom<StoredTrick> for Trick {
    type Error = TrickError;

    fn try_from(stored: StoredTrick) -> Result<Self, Self::Error> {
        let mut trick = Trick::new(stored.leader);
        for play in stored.plays {
            trick.play(play.position, play.card)?;
        }
        Ok(trick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} played twice in one trick")]
    DuplicateCard(Card),
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    /// Cards in play order, as agents see them.
    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        if self.plays.iter().any(|play| play.card == card) {
            return Err(TrickError::DuplicateCard(card));
        }

        self.plays.push(Play { position, card });
        Ok(())
    }

    /// Highest card of the lead suit; off-suit cards never win.
    pub fn winner(&self) -> Option<PlayerPosition> {
        if !self.is_complete() {
            return None;
        }
        let lead_suit = self.lead_suit()?;
        self.plays
            .iter()
            .filter(|play| play.card.suit == lead_suit)
            .max_by(|a, b| a.card.cmp_rank(&b.card))
            .map(|play| play.position)
    }

    pub fn penalty_total(&self) -> u32 {
        self.plays
            .iter()
            .map(|play| u32::from(play.card.penalty_value()))
            .sum()
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(PlayerPosition::North);
        assert!(
            trick
                .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
                .is_ok()
        );
        assert!(matches!(
            trick.play(PlayerPosition::South, Card::new(Rank::Three, Suit::Clubs)),
            Err(TrickError::OutOfTurn { .. })
        ));
    }

    #[test]
    fn fifth_play_is_rejected() {
        let mut trick = Trick::new(PlayerPosition::East);
        let mut seat = PlayerPosition::East;
        for rank in [Rank::Two, Rank::Three, Rank::Four, Rank::Five] {
            trick.play(seat, Card::new(rank, Suit::Diamonds)).unwrap();
            seat = seat.next();
        }
        assert_eq!(
            trick.play(seat, Card::new(Rank::Six, Suit::Diamonds)),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn winner_is_highest_card_of_lead_suit() {
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, Card::new(Rank::Five, Suit::Spades))
            .unwrap();
        trick
            .play(PlayerPosition::East, Card::new(Rank::King, Suit::Spades))
            .unwrap();
        trick
            .play(PlayerPosition::South, Card::new(Rank::Two, Suit::Hearts))
            .unwrap();
        trick
            .play(PlayerPosition::West, Card::new(Rank::Three, Suit::Spades))
            .unwrap();

        assert_eq!(trick.winner(), Some(PlayerPosition::East));
        assert_eq!(trick.penalty_total(), 1);
    }

    #[test]
    fn off_suit_ace_does_not_win() {
        let mut trick = Trick::new(PlayerPosition::South);
        trick
            .play(PlayerPosition::South, Card::new(Rank::Ten, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::West, Card::new(Rank::Ace, Suit::Spades))
            .unwrap();
        trick
            .play(PlayerPosition::North, Card::new(Rank::Four, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::East, Card::new(Rank::Queen, Suit::Spades))
            .unwrap();

        assert_eq!(trick.winner(), Some(PlayerPosition::South));
        assert_eq!(trick.penalty_total(), 13);
    }

    #[test]
    fn loading_replays_turn_order() {
        let json = r#"{"leader":"North","plays":[{"position":"South","card":"QS"}]}"#;
        let err = serde_json::from_str::<Trick>(json).unwrap_err();
        assert!(err.to_string().contains("expected North"), "{err}");

        let json = r#"{"leader":"North","plays":[
            {"position":"North","card":"2C"},
            {"position":"East","card":"2C"}]}"#;
        assert!(serde_json::from_str::<Trick>(json).is_err());

        let mut trick = Trick::new(PlayerPosition::West);
        trick.play(PlayerPosition::West, Card::TWO_OF_CLUBS).unwrap();
        let json = serde_json::to_string(&trick).unwrap();
        assert_eq!(serde_json::from_str::<Trick>(&json).unwrap(), trick);
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, Card::TWO_OF_CLUBS)
            .unwrap();
        assert_eq!(trick.winner(), None);
        assert_eq!(trick.lead_suit(), Some(Suit::Clubs));
        assert_eq!(trick.expected_position(), PlayerPosition::East);
    }
}
