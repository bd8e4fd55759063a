use hearts_bot::{AgentKind, LowestLegalAgent, build_agent};
use hearts_core::game::{HandEngine, Seats};
use hearts_core::model::card::Card;
use hearts_core::model::deck::Deck;
use hearts_core::model::player::PlayerPosition;

fn lowest_seats() -> Seats {
    [
        Box::new(LowestLegalAgent::new("north")),
        Box::new(LowestLegalAgent::new("east")),
        Box::new(LowestLegalAgent::new("south")),
        Box::new(LowestLegalAgent::new("west")),
    ]
}

fn seats_of(kind: AgentKind, seed: u64) -> Seats {
    PlayerPosition::LOOP.map(|seat| build_agent(kind, seat.to_string(), seed + seat.index() as u64))
}

fn deck_from(text: &str) -> Deck {
    let cards: Vec<Card> = text
        .split_whitespace()
        .map(|token| token.parse().expect("card literal"))
        .collect();
    Deck::from_cards(cards).expect("full deck")
}

#[test]
fn unshuffled_deck_with_lowest_agents() {
    let outcome = HandEngine::new(lowest_seats())
        .play_hand(&Deck::standard())
        .expect("lowest-legal agents never break the rules");

    assert_eq!(outcome.scores, [10, 14, 2, 0]);
    assert_eq!(outcome.scores.iter().sum::<u32>(), 26);

    let first = &outcome.history.tricks()[0];
    assert_eq!(first.leader(), PlayerPosition::North);
    let opening: Vec<String> = first.plays().iter().map(|p| p.card.to_string()).collect();
    assert_eq!(opening, ["2C", "2D", "2S", "QC"]);
    assert_eq!(first.winner(), Some(PlayerPosition::West));
}

#[test]
fn taking_every_point_shoots_the_moon() {
    let deck = deck_from(
        "QC 5C 8S 8D QS 2D KH 8H AH 4D 7H 9H 5D QH 2H 7S 3H 9C 6D 5H 6C 7C 9D 2S 4C 10H \
         AC 10S 10D QD 2C KS 7D KD JH KC JS 6S 10C 9S 4S 5S 3S 3C JD 4H 3D JC 6H 8C AD AS",
    );
    let outcome = HandEngine::new(lowest_seats())
        .play_hand(&deck)
        .expect("hand completes");

    assert_eq!(outcome.points_taken, [0, 0, 26, 0]);
    assert_eq!(outcome.scores, [26, 26, 0, 26]);
    assert_eq!(outcome.moon_shooter, Some(PlayerPosition::South));
}

#[test]
fn moon_by_west() {
    let deck = deck_from(
        "10S 3C AH 7S 2S AS 6S 10D 3S 6C 5S JS 7H 4D 9C KD 8H 8C 10H 3H QD 8S QH 7C 5C 2H \
         6H JC 9H 8D 5D 3D 2D 4H 5H AC JD 7D 2C 6D KC QS 9D KH 9S AD 4S QC JH 10C KS 4C",
    );
    let outcome = HandEngine::new(lowest_seats())
        .play_hand(&deck)
        .expect("hand completes");

    assert_eq!(outcome.points_taken, [0, 0, 0, 26]);
    assert_eq!(outcome.scores, [26, 26, 26, 0]);
    assert_eq!(outcome.moon_shooter, Some(PlayerPosition::West));
}

#[test]
fn every_agent_kind_finishes_seeded_hands() {
    for kind in AgentKind::ALL {
        for seed in 0..25 {
            let deck = Deck::shuffled_with_seed(seed);
            let outcome = HandEngine::new(seats_of(kind, seed))
                .play_hand(&deck)
                .unwrap_or_else(|err| panic!("{kind} agents aborted deck {seed}: {err}"));

            let total: u32 = outcome.scores.iter().sum();
            assert!(total == 26 || total == 78, "{kind} deck {seed}: total {total}");
            assert_eq!(outcome.points_taken.iter().sum::<u32>(), 26);
            assert_eq!(outcome.history.len(), 13);
        }
    }
}

#[test]
fn random_agents_replay_identically() {
    let deck = Deck::shuffled_with_seed(2024);
    let first = HandEngine::new(seats_of(AgentKind::Random, 1))
        .play_hand(&deck)
        .expect("hand completes");
    let second = HandEngine::new(seats_of(AgentKind::Random, 1))
        .play_hand(&deck)
        .expect("hand completes");
    assert_eq!(first, second);
}
