use crate::model::card::Card;
use crate::model::deck::DeckError;
use crate::model::player::PlayerPosition;
use crate::model::trick::TrickError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Why a pass selection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassViolation {
    CardNotInHand(Card),
    DuplicateCard(Card),
}

impl fmt::Display for PassViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassViolation::CardNotInHand(card) => write!(f, "{card} is not in the passing hand"),
            PassViolation::DuplicateCard(card) => write!(f, "{card} was selected more than once"),
        }
    }
}

/// Every way a hand can abort. No score is produced once one of these is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("{seat} passed an illegal selection [{}]: {violation}", format_cards(cards))]
    IllegalPass {
        seat: PlayerPosition,
        cards: [Card; 3],
        violation: PassViolation,
    },
    #[error("{seat} played {card}, legal moves were [{}]", format_cards(legal))]
    IllegalMove {
        seat: PlayerPosition,
        card: Card,
        legal: Vec<Card>,
    },
    #[error("{seat} took {elapsed:?} to decide, budget is {budget:?}")]
    AgentTimeout {
        seat: PlayerPosition,
        elapsed: Duration,
        budget: Duration,
    },
    #[error("trick bookkeeping failed: {0}")]
    Trick(#[from] TrickError),
    #[error("card accounting invariant violated: {0}")]
    Invariant(String),
}

impl HandError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        HandError::Invariant(message.into())
    }

    /// Seat whose agent caused the abort, when one did.
    pub fn seat(&self) -> Option<PlayerPosition> {
        match self {
            HandError::IllegalPass { seat, .. }
            | HandError::IllegalMove { seat, .. }
            | HandError::AgentTimeout { seat, .. } => Some(*seat),
            HandError::Deck(_) | HandError::Trick(_) | HandError::Invariant(_) => None,
        }
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{HandError, PassViolation};
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;

    #[test]
    fn illegal_move_message_lists_legal_cards() {
        let err = HandError::IllegalMove {
            seat: PlayerPosition::East,
            card: Card::QUEEN_OF_SPADES,
            legal: vec!["3D".parse().unwrap(), "9D".parse().unwrap()],
        };
        assert_eq!(err.to_string(), "East played QS, legal moves were [3D 9D]");
        assert_eq!(err.seat(), Some(PlayerPosition::East));
    }

    #[test]
    fn illegal_pass_message_names_violation() {
        let err = HandError::IllegalPass {
            seat: PlayerPosition::West,
            cards: [Card::TWO_OF_CLUBS, Card::TWO_OF_CLUBS, Card::QUEEN_OF_SPADES],
            violation: PassViolation::DuplicateCard(Card::TWO_OF_CLUBS),
        };
        let text = err.to_string();
        assert!(text.starts_with("West passed an illegal selection [2C 2C QS]"));
        assert!(text.ends_with("2C was selected more than once"));
    }

    #[test]
    fn invariant_errors_have_no_seat() {
        assert_eq!(HandError::invariant("boom").seat(), None);
    }
}
