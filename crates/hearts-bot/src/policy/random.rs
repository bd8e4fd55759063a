use super::{log_pass_decision, log_play_decision};
use hearts_core::game::{Agent, PassContext, PlayContext};
use hearts_core::model::card::Card;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Picks uniformly among the legal options. Seeded so that a table replay
/// with the same seed reproduces every decision.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_cards_to_pass(&mut self, ctx: &PassContext<'_>) -> [Card; 3] {
        let mut cards = ctx.sorted_hand();
        cards.shuffle(&mut self.rng);
        let selection = [cards[0], cards[1], cards[2]];
        log_pass_decision(&self.name, ctx.seat, ctx.target, &selection, "uniform");
        selection
    }

    fn play(&mut self, ctx: &PlayContext<'_>) -> Card {
        let legal = ctx.legal_moves();
        let chosen = *legal
            .choose(&mut self.rng)
            .expect("a seat with cards always has a legal move");
        log_play_decision(&self.name, ctx.seat, &legal, chosen, "uniform");
        chosen
    }
}
