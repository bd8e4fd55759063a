use super::{log_pass_decision, log_play_decision, rank_key};
use hearts_core::game::{Agent, PassContext, PlayContext};
use hearts_core::model::card::Card;

/// Baseline agent: passes its three highest cards and always plays the
/// lowest legal card (rank first, suit order as tie-break).
pub struct LowestLegalAgent {
    name: String,
}

impl LowestLegalAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn pick_pass(cards: &[Card]) -> [Card; 3] {
        let mut ranked = cards.to_vec();
        ranked.sort_by_key(|card| std::cmp::Reverse(rank_key(*card)));
        [ranked[0], ranked[1], ranked[2]]
    }

    pub fn pick_play(legal: &[Card]) -> Option<Card> {
        legal.iter().copied().min_by_key(|card| rank_key(*card))
    }
}

impl Agent for LowestLegalAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_cards_to_pass(&mut self, ctx: &PassContext<'_>) -> [Card; 3] {
        let selection = Self::pick_pass(&ctx.sorted_hand());
        log_pass_decision(&self.name, ctx.seat, ctx.target, &selection, "highest_three");
        selection
    }

    fn play(&mut self, ctx: &PlayContext<'_>) -> Card {
        let legal = ctx.legal_moves();
        let chosen =
            Self::pick_play(&legal).expect("a seat with cards always has a legal move");
        log_play_decision(&self.name, ctx.seat, &legal, chosen, "lowest_legal");
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::LowestLegalAgent;
    use hearts_core::model::card::Card;

    fn cards(texts: &[&str]) -> Vec<Card> {
        texts.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn passes_highest_ranks_with_suit_tie_break() {
        let hand = cards(&["AC", "AH", "KS", "KD", "2H", "QS"]);
        let picks = LowestLegalAgent::pick_pass(&hand);
        assert_eq!(picks.to_vec(), cards(&["AH", "AC", "KS"]));
    }

    #[test]
    fn plays_lowest_rank_then_lowest_suit() {
        let legal = cards(&["5S", "3H", "3D", "9C"]);
        assert_eq!(LowestLegalAgent::pick_play(&legal), Some("3D".parse().unwrap()));
        assert_eq!(LowestLegalAgent::pick_play(&[]), None);
    }
}
