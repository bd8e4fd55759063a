use crate::game::agent::Seats;
use crate::game::config::EngineConfig;
use crate::game::error::HandError;
use crate::game::passing::PassEngine;
use crate::game::trick_engine::TrickEngine;
use crate::model::card::Card;
use crate::model::deck::{DECK_SIZE, Deck, HAND_SIZE};
use crate::model::hand::Hand;
use crate::model::history::GameHistory;
use crate::model::player::PlayerPosition;
use crate::model::score::ScoreBoard;
use crate::model::trick::Trick;
use tracing::{Level, event};

pub const TRICKS_PER_HAND: usize = HAND_SIZE;

/// Result of a hand that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOutcome {
    /// Scores after the moon rule.
    pub scores: [u32; 4],
    /// Points actually captured in tricks.
    pub points_taken: [u32; 4],
    pub moon_shooter: Option<PlayerPosition>,
    pub passes: [[Card; 3]; 4],
    pub history: GameHistory,
}

/// Everything that changes while a hand is played. Owned by [`HandEngine`]
/// and rebuilt for every hand.
#[derive(Debug, Clone)]
pub struct HandState {
    hands: [Hand; 4],
    hearts_broken: bool,
    history: GameHistory,
    scores: ScoreBoard,
}

impl HandState {
    pub fn new(hands: [Hand; 4]) -> Self {
        Self {
            hands,
            hearts_broken: false,
            history: GameHistory::new(),
            scores: ScoreBoard::new(),
        }
    }

    pub fn leader(&self) -> Option<PlayerPosition> {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|seat| self.hands[seat.index()].contains(Card::TWO_OF_CLUBS))
    }

    /// Credits the trick's points to its winner and appends it to the history.
    /// Returns the winner and the points taken.
    pub fn record_trick(
        &mut self,
        trick: Trick,
        hearts_broken: bool,
    ) -> Result<(PlayerPosition, u32), HandError> {
        if !self.history.push(trick) {
            return Err(HandError::invariant("incomplete trick reached history"));
        }
        let recorded = self
            .history
            .last()
            .ok_or_else(|| HandError::invariant("history lost the recorded trick"))?;
        let winner = recorded
            .winner()
            .ok_or_else(|| HandError::invariant("completed trick has no winner"))?;
        let points = recorded.penalty_total();
        self.scores.add_penalty(winner, points);
        self.hearts_broken = hearts_broken;
        Ok((winner, points))
    }

    /// Hands plus played cards must be the full deck with no overlaps.
    pub fn check_conservation(&self) -> Result<(), HandError> {
        check_conservation(&self.hands, &self.history, &[])
    }
}

pub fn check_conservation(
    hands: &[Hand; 4],
    history: &GameHistory,
    in_flight: &[Card],
) -> Result<(), HandError> {
    let mut seen = Hand::new();
    let mut count = 0usize;
    let played = history
        .tricks()
        .iter()
        .flat_map(|trick| trick.plays().iter().map(|play| play.card));
    let held = hands.iter().flat_map(|hand| hand.iter());
    for card in held.chain(played).chain(in_flight.iter().copied()) {
        count += 1;
        if !seen.add(card) {
            return Err(HandError::invariant(format!("{card} is accounted for twice")));
        }
    }
    if count != DECK_SIZE {
        return Err(HandError::invariant(format!(
            "{count} cards accounted for, expected {DECK_SIZE}"
        )));
    }
    Ok(())
}

/// Plays single hands of Hearts between four agents.
pub struct HandEngine {
    agents: Seats,
    config: EngineConfig,
}

impl HandEngine {
    pub fn new(agents: Seats) -> Self {
        Self::with_config(agents, EngineConfig::default())
    }

    pub fn with_config(agents: Seats, config: EngineConfig) -> Self {
        Self { agents, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn agent_names(&self) -> [String; 4] {
        std::array::from_fn(|index| self.agents[index].name().to_string())
    }

    pub fn into_agents(self) -> Seats {
        self.agents
    }

    /// Plays a hand from a raw 52-card sequence, rejecting anything that is
    /// not exactly one standard deck.
    pub fn play_sequence(&mut self, cards: Vec<Card>) -> Result<HandOutcome, HandError> {
        let deck = Deck::from_cards(cards)?;
        self.play_hand(&deck)
    }

    /// Deals `deck`, runs the pass and thirteen tricks, and returns the
    /// settled scores. Any rule violation aborts the hand.
    pub fn play_hand(&mut self, deck: &Deck) -> Result<HandOutcome, HandError> {
        let dealt = deck.deal();
        check_conservation(&dealt, &GameHistory::new(), &[])?;
        event!(
            target: "hearts_core::hand",
            Level::INFO,
            agents = ?self.agent_names(),
            "hand set up"
        );

        let passed = PassEngine::exchange(&dealt, &mut self.agents, &self.config)?;
        let mut state = HandState::new(passed.hands);
        state.check_conservation()?;

        let mut leader = state
            .leader()
            .ok_or_else(|| HandError::invariant("nobody holds the two of clubs"))?;

        for round in 1..=TRICKS_PER_HAND {
            let first_trick = state.history.is_empty();
            let result = TrickEngine::new(leader, state.hearts_broken, first_trick).run(
                &mut state.hands,
                &mut self.agents,
                &state.history,
                &self.config,
            )?;

            let (winner, points) = state.record_trick(result.trick, result.hearts_broken)?;
            state.check_conservation()?;

            event!(
                target: "hearts_core::hand",
                Level::DEBUG,
                round,
                leader = %leader,
                winner = %winner,
                points,
                hearts_broken = state.hearts_broken,
                "trick complete"
            );
            leader = winner;
        }

        if state.hands.iter().any(|hand| !hand.is_empty()) {
            return Err(HandError::invariant("cards left in hand after the last trick"));
        }

        let points_taken = *state.scores.standings();
        let moon_shooter = state.scores.moon_shooter();
        let scores = state.scores.settle();
        event!(
            target: "hearts_core::hand",
            Level::INFO,
            ?points_taken,
            ?scores,
            moon_shooter = ?moon_shooter,
            "hand complete"
        );

        Ok(HandOutcome {
            scores,
            points_taken,
            moon_shooter,
            passes: passed.selections,
            history: state.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{HandEngine, HandState, check_conservation};
    use crate::game::agent::{Agent, PassContext, PlayContext, Seats};
    use crate::game::error::HandError;
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::history::GameHistory;
    use crate::model::player::PlayerPosition;
    use crate::model::trick::Trick;

    struct Lowest;

    impl Agent for Lowest {
        fn choose_cards_to_pass(&mut self, ctx: &PassContext<'_>) -> [Card; 3] {
            let cards = ctx.sorted_hand();
            [cards[0], cards[1], cards[2]]
        }

        fn play(&mut self, ctx: &PlayContext<'_>) -> Card {
            ctx.legal_moves()
                .into_iter()
                .min_by(|a, b| a.rank.cmp(&b.rank).then(a.suit.cmp(&b.suit)))
                .expect("non-empty hand")
        }
    }

    fn lowest_seats() -> Seats {
        [
            Box::new(Lowest),
            Box::new(Lowest),
            Box::new(Lowest),
            Box::new(Lowest),
        ]
    }

    #[test]
    fn full_hand_distributes_all_points() {
        let mut engine = HandEngine::new(lowest_seats());
        let outcome = engine
            .play_hand(&Deck::shuffled_with_seed(11))
            .expect("hand completes");
        assert_eq!(outcome.history.len(), 13);
        assert_eq!(outcome.points_taken.iter().sum::<u32>(), 26);
        match outcome.moon_shooter {
            Some(_) => assert_eq!(outcome.scores.iter().sum::<u32>(), 78),
            None => assert_eq!(outcome.scores, outcome.points_taken),
        }
    }

    #[test]
    fn first_trick_is_led_with_two_of_clubs() {
        let mut engine = HandEngine::new(lowest_seats());
        let outcome = engine.play_hand(&Deck::shuffled_with_seed(3)).unwrap();
        let first = &outcome.history.tricks()[0];
        assert_eq!(first.plays()[0].card, Card::TWO_OF_CLUBS);
        assert_eq!(first.plays()[0].position, first.leader());
    }

    #[test]
    fn winners_lead_the_next_trick() {
        let mut engine = HandEngine::new(lowest_seats());
        let outcome = engine.play_hand(&Deck::shuffled_with_seed(5)).unwrap();
        let tricks = outcome.history.tricks();
        for pair in tricks.windows(2) {
            assert_eq!(pair[0].winner(), Some(pair[1].leader()));
        }
    }

    #[test]
    fn hand_state_conservation_detects_duplicates() {
        let mut hands = Deck::standard().deal();
        assert!(HandState::new(hands).check_conservation().is_ok());
        hands[1].add(Card::TWO_OF_CLUBS);
        assert!(matches!(
            HandState::new(hands).check_conservation(),
            Err(HandError::Invariant(_))
        ));
    }

    #[test]
    fn conservation_counts_in_flight_cards() {
        let mut hands = Deck::standard().deal();
        hands[0].remove(Card::TWO_OF_CLUBS);
        let history = GameHistory::new();
        assert!(check_conservation(&hands, &history, &[]).is_err());
        assert!(check_conservation(&hands, &history, &[Card::TWO_OF_CLUBS]).is_ok());
    }

    #[test]
    fn short_sequence_is_rejected_before_dealing() {
        let mut engine = HandEngine::new(lowest_seats());
        let mut cards = Deck::standard().cards().to_vec();
        cards.truncate(40);
        assert!(matches!(
            engine.play_sequence(cards),
            Err(HandError::Deck(_))
        ));
    }

    #[test]
    fn recording_an_incomplete_trick_fails_loudly() {
        let mut state = HandState::new(Deck::standard().deal());
        let mut trick = Trick::new(PlayerPosition::North);
        trick.play(PlayerPosition::North, Card::TWO_OF_CLUBS).unwrap();

        match state.record_trick(trick, false) {
            Err(HandError::Invariant(message)) => {
                assert!(message.contains("incomplete trick"), "{message}");
            }
            other => panic!("expected invariant error, got {other:?}"),
        }
        assert!(state.history.is_empty());
        assert_eq!(state.scores.standings(), &[0, 0, 0, 0]);
    }

    #[test]
    fn recording_a_trick_credits_the_winner() {
        let mut state = HandState::new(Deck::standard().deal());
        let mut trick = Trick::new(PlayerPosition::West);
        let cards: [Card; 4] = ["9D", "AD", "4H", "QS"].map(|text| text.parse().unwrap());
        let mut seat = PlayerPosition::West;
        for card in cards {
            trick.play(seat, card).unwrap();
            seat = seat.next();
        }

        let (winner, points) = state.record_trick(trick, true).expect("complete trick");
        assert_eq!(winner, PlayerPosition::North);
        assert_eq!(points, 14);
        assert!(state.hearts_broken);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.scores.score(PlayerPosition::North), 14);
    }

    #[test]
    fn leader_is_two_of_clubs_holder() {
        let hands = Deck::standard().deal();
        assert_eq!(HandState::new(hands).leader(), Some(PlayerPosition::North));
    }
}
