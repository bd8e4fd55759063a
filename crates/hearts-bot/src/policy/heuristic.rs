use super::{count_cards_in_suit, log_pass_decision, log_play_decision, rank_key};
use hearts_core::game::{Agent, PassContext, PlayContext};
use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::rank::Rank;
use hearts_core::model::suit::Suit;

/// Tunable pass scores. Higher means "more eager to pass away".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicWeights {
    pub pass_queen_spades: i32,
    pub pass_high_spades: i32,
    pub pass_hearts_base: i32,
    pub pass_hearts_rank_mult: i32,
    pub pass_high_cards_base: i32,
    pub pass_high_cards_rank_mult: i32,
    pub pass_void_creation_base: i32,
    pub pass_void_creation_mult: i32,
    pub pass_long_suit_penalty: i32,
    pub pass_two_clubs_penalty: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            pass_queen_spades: 120,
            pass_high_spades: 90,
            pass_hearts_base: 20,
            pass_hearts_rank_mult: 3,
            pass_high_cards_base: 10,
            pass_high_cards_rank_mult: 2,
            pass_void_creation_base: 15,
            pass_void_creation_mult: 5,
            pass_long_suit_penalty: 4,
            pass_two_clubs_penalty: -30,
        }
    }
}

/// Rule-of-thumb player: dumps dangerous cards in the pass, ducks under the
/// current trick winner when it can, and sheds penalty cards when void.
pub struct HeuristicAgent {
    name: String,
    weights: HeuristicWeights,
}

impl HeuristicAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_weights(name, HeuristicWeights::default())
    }

    pub fn with_weights(name: impl Into<String>, weights: HeuristicWeights) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    fn score_pass_card(&self, card: Card, hand: &Hand) -> i32 {
        let w = &self.weights;
        let mut score = 0;
        let suit_len = count_cards_in_suit(hand, card.suit) as i32;
        let rank_value = card.rank.value() as i32;

        if card.is_queen_of_spades() {
            score += w.pass_queen_spades;
        } else if card.suit == Suit::Spades && card.rank >= Rank::King {
            score += w.pass_high_spades;
        }

        if card.suit.is_heart() {
            score += w.pass_hearts_base + rank_value * w.pass_hearts_rank_mult;
        } else if card.rank >= Rank::King {
            score += w.pass_high_cards_base + rank_value * w.pass_high_cards_rank_mult;
        }

        if suit_len <= 2 {
            score += w.pass_void_creation_base - suit_len * w.pass_void_creation_mult;
        } else if suit_len >= 5 {
            score -= (suit_len - 4) * w.pass_long_suit_penalty;
        }

        if card.is_two_of_clubs() {
            score += w.pass_two_clubs_penalty;
        }

        score
    }

    pub fn pick_pass(&self, hand: &Hand) -> [Card; 3] {
        let mut scored: Vec<(Card, i32)> = hand
            .iter()
            .map(|card| (card, self.score_pass_card(card, hand)))
            .collect();
        scored.sort_by(|(card_a, score_a), (card_b, score_b)| {
            score_b
                .cmp(score_a)
                .then_with(|| rank_key(*card_b).cmp(&rank_key(*card_a)))
        });
        [scored[0].0, scored[1].0, scored[2].0]
    }

    pub fn pick_play(legal: &[Card], trick_so_far: &[Card]) -> Option<(Card, &'static str)> {
        if legal.len() <= 1 {
            return legal.first().map(|card| (*card, "forced"));
        }

        let Some(lead) = trick_so_far.first() else {
            let safe: Vec<Card> = legal.iter().copied().filter(|c| !c.is_penalty()).collect();
            let pool: &[Card] = if safe.is_empty() { legal } else { &safe };
            return lowest(pool).map(|card| (card, "lead_low"));
        };

        let winning = trick_so_far
            .iter()
            .filter(|card| card.suit == lead.suit)
            .max_by(|a, b| a.cmp_rank(b))
            .copied()
            .unwrap_or(*lead);

        if legal.iter().all(|card| card.suit == lead.suit) {
            let under: Vec<Card> = legal
                .iter()
                .copied()
                .filter(|card| card.rank < winning.rank)
                .collect();
            if let Some(card) = highest(&under) {
                return Some((card, "duck"));
            }
            if trick_so_far.len() == 3 {
                // Winning regardless: spend the biggest card that isn't the queen.
                let keep_queen: Vec<Card> = legal
                    .iter()
                    .copied()
                    .filter(|card| !card.is_queen_of_spades())
                    .collect();
                let pool: &[Card] = if keep_queen.is_empty() { legal } else { &keep_queen };
                return highest(pool).map(|card| (card, "win_high"));
            }
            return lowest(legal).map(|card| (card, "win_low"));
        }

        legal
            .iter()
            .copied()
            .max_by_key(|card| (card.penalty_value(), rank_key(*card)))
            .map(|card| (card, "shed"))
    }
}

fn lowest(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|card| rank_key(*card))
}

fn highest(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().max_by_key(|card| rank_key(*card))
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_cards_to_pass(&mut self, ctx: &PassContext<'_>) -> [Card; 3] {
        let selection = self.pick_pass(ctx.hand);
        log_pass_decision(&self.name, ctx.seat, ctx.target, &selection, "heuristic_pass");
        selection
    }

    fn play(&mut self, ctx: &PlayContext<'_>) -> Card {
        let legal = ctx.legal_moves();
        let (chosen, reason) = Self::pick_play(&legal, ctx.trick_so_far)
            .expect("a seat with cards always has a legal move");
        log_play_decision(&self.name, ctx.seat, &legal, chosen, reason);
        chosen
    }
}
