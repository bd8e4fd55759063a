use super::error::HandError;
use super::hand_engine::HandOutcome;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::history::GameHistory;
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};

/// JSON view of one hand, finished or aborted. Aborted hands carry the error
/// text and no scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandRecord {
    pub hand_index: usize,
    pub deal: [Vec<Card>; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passes: Option<[[Card; 3]; 4]>,
    #[serde(default)]
    pub tricks: GameHistory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_taken: Option<[u32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<[u32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon_shooter: Option<PlayerPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HandRecord {
    pub fn capture(hand_index: usize, deck: &Deck, result: &Result<HandOutcome, HandError>) -> Self {
        let deal = deck.deal().map(|hand| hand.cards());
        match result {
            Ok(outcome) => HandRecord {
                hand_index,
                deal,
                passes: Some(outcome.passes),
                tricks: outcome.history.clone(),
                points_taken: Some(outcome.points_taken),
                scores: Some(outcome.scores),
                moon_shooter: outcome.moon_shooter,
                error: None,
            },
            Err(err) => HandRecord {
                hand_index,
                deal,
                passes: None,
                tricks: GameHistory::new(),
                points_taken: None,
                scores: None,
                moon_shooter: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
