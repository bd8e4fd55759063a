use crate::model::card::Card;
use crate::model::deck::HAND_SIZE;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::trick::Trick;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Completed tricks of the current hand, oldest first. Each trick carries its
/// leading seat. Tricks are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Trick>", into = "Vec<Trick>")]
pub struct GameHistory {
    tricks: Vec<Trick>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("trick {index} is incomplete")]
    IncompleteTrick { index: usize },
    #[error("{card} appears in more than one trick")]
    DuplicateCard { card: Card },
    #[error("{count} tricks recorded, a hand has at most {max}")]
    TooManyTricks { count: usize, max: usize },
}

impl TryFrom<Vec<Trick>> for GameHistory {
    type Error = HistoryError;

    fn try_from(tricks: Vec<Trick>) -> Result<Self, Self::Error> {
        if tricks.len() > HAND_SIZE {
            return Err(HistoryError::TooManyTricks {
                count: tricks.len(),
                max: HAND_SIZE,
            });
        }
        let mut history = GameHistory::new();
        let mut seen = Hand::new();
        for (index, trick) in tricks.into_iter().enumerate() {
            if let Some(card) = trick.cards().into_iter().find(|card| !seen.add(*card)) {
                return Err(HistoryError::DuplicateCard { card });
            }
            if !history.push(trick) {
                return Err(HistoryError::IncompleteTrick { index });
            }
        }
        Ok(history)
    }
}

impl From<GameHistory> for Vec<Trick> {
    fn from(history: GameHistory) -> Self {
        history.tricks
    }
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only complete tricks are recorded; anything else is ignored and
    /// reported as `false`.
    #[must_use]
    pub fn push(&mut self, trick: Trick) -> bool {
        if !trick.is_complete() {
            return false;
        }
        self.tricks.push(trick);
        true
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn len(&self) -> usize {
        self.tricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tricks.is_empty()
    }

    pub fn last(&self) -> Option<&Trick> {
        self.tricks.last()
    }

    pub fn cards_played(&self) -> Hand {
        self.tricks
            .iter()
            .flat_map(|trick| trick.plays().iter().map(|play| play.card))
            .collect()
    }

    pub fn winners(&self) -> Vec<PlayerPosition> {
        self.tricks.iter().filter_map(Trick::winner).collect()
    }

    /// Raw points captured per seat, before any moon adjustment.
    pub fn points_taken(&self) -> [u32; 4] {
        let mut totals = [0u32; 4];
        for trick in &self.tricks {
            if let Some(winner) = trick.winner() {
                totals[winner.index()] += trick.penalty_total();
            }
        }
        totals
    }

    pub fn hearts_played(&self) -> bool {
        self.tricks
            .iter()
            .flat_map(|trick| trick.plays())
            .any(|play| play.card.suit.is_heart())
    }

    pub fn contains(&self, card: Card) -> bool {
        self.tricks
            .iter()
            .any(|trick| trick.plays().iter().any(|play| play.card == card))
    }
}
