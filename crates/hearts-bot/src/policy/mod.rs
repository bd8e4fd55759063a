mod heuristic;
mod lowest;
mod random;

pub use heuristic::{HeuristicAgent, HeuristicWeights};
pub use lowest::LowestLegalAgent;
pub use random::RandomAgent;

use core::fmt;
use core::str::FromStr;
use hearts_core::game::Agent;
use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::player::PlayerPosition;
use hearts_core::model::suit::Suit;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Built-in agent families a table can seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Lowest,
    Heuristic,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Random, AgentKind::Lowest, AgentKind::Heuristic];

    pub const fn as_str(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Lowest => "lowest",
            AgentKind::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAgentKindError(String);

impl fmt::Display for ParseAgentKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown agent kind '{}' (expected random, lowest or heuristic)",
            self.0
        )
    }
}

impl std::error::Error for ParseAgentKindError {}

impl FromStr for AgentKind {
    type Err = ParseAgentKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseAgentKindError(value.to_string()))
    }
}

/// Boxes a fresh agent of the requested kind. `seed` only matters for
/// [`AgentKind::Random`].
pub fn build_agent(kind: AgentKind, name: impl Into<String>, seed: u64) -> Box<dyn Agent> {
    let name = name.into();
    match kind {
        AgentKind::Random => Box::new(RandomAgent::with_seed(name, seed)),
        AgentKind::Lowest => Box::new(LowestLegalAgent::new(name)),
        AgentKind::Heuristic => Box::new(HeuristicAgent::new(name)),
    }
}

/// Rank first, suit as tie-break. Lower keys are "cheaper" cards.
pub(crate) fn rank_key(card: Card) -> (u8, usize) {
    (card.rank.value(), card.suit.index())
}

pub(crate) fn count_cards_in_suit(hand: &Hand, suit: Suit) -> usize {
    hand.cards_of_suit(suit).count()
}

fn card_list(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn log_pass_decision(
    agent: &str,
    seat: PlayerPosition,
    target: PlayerPosition,
    selection: &[Card; 3],
    reason: &str,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    event!(
        target: "hearts_bot::pass",
        Level::DEBUG,
        agent,
        seat = %seat,
        target = %target,
        cards = %card_list(selection),
        reason,
    );
}

pub(crate) fn log_play_decision(
    agent: &str,
    seat: PlayerPosition,
    legal_moves: &[Card],
    chosen: Card,
    reason: &str,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = if legal_moves.len() <= 6 {
        card_list(legal_moves)
    } else {
        format!("{} moves", legal_moves.len())
    };

    event!(
        target: "hearts_bot::play",
        Level::DEBUG,
        agent,
        seat = %seat,
        legal_count = legal_moves.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        reason,
    );
}
