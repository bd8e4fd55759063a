use crate::game::agent::{PassContext, Seats};
use crate::game::config::EngineConfig;
use crate::game::error::{HandError, PassViolation};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use std::array;
use tracing::{Level, event};

/// Cards leave a seat for the seat before it in turn order, so every seat
/// receives from the seat after it.
pub const fn pass_target(seat: PlayerPosition) -> PlayerPosition {
    seat.previous()
}

pub const fn pass_source(seat: PlayerPosition) -> PlayerPosition {
    seat.next()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub hands: [Hand; 4],
    pub selections: [[Card; 3]; 4],
}

pub struct PassEngine;

impl PassEngine {
    /// Collects a selection from every seat against the original hands, then
    /// validates and applies them together. On error `hands` is untouched.
    pub fn exchange(
        hands: &[Hand; 4],
        agents: &mut Seats,
        config: &EngineConfig,
    ) -> Result<PassOutcome, HandError> {
        let mut selections = [[Card::TWO_OF_CLUBS; 3]; 4];
        for seat in PlayerPosition::LOOP {
            let ctx = PassContext {
                seat,
                target: pass_target(seat),
                hand: &hands[seat.index()],
            };
            let agent = &mut agents[seat.index()];
            let cards = config.guard(seat, || agent.choose_cards_to_pass(&ctx))?;
            event!(
                target: "hearts_core::pass",
                Level::DEBUG,
                seat = %seat,
                to = %ctx.target,
                cards = %format!("{} {} {}", cards[0], cards[1], cards[2]),
            );
            selections[seat.index()] = cards;
        }

        let hands = apply_passes(hands, &selections)?;
        Ok(PassOutcome { hands, selections })
    }
}

pub fn validate_selection(
    seat: PlayerPosition,
    hand: &Hand,
    cards: [Card; 3],
) -> Result<(), HandError> {
    let mut seen = Hand::new();
    for card in cards {
        let violation = if !hand.contains(card) {
            Some(PassViolation::CardNotInHand(card))
        } else if !seen.add(card) {
            Some(PassViolation::DuplicateCard(card))
        } else {
            None
        };
        if let Some(violation) = violation {
            return Err(HandError::IllegalPass {
                seat,
                cards,
                violation,
            });
        }
    }
    Ok(())
}

/// Pure exchange: each new hand is `(own - given) | received`.
pub fn apply_passes(
    hands: &[Hand; 4],
    selections: &[[Card; 3]; 4],
) -> Result<[Hand; 4], HandError> {
    for seat in PlayerPosition::LOOP {
        validate_selection(seat, &hands[seat.index()], selections[seat.index()])?;
    }

    let mut next: [Hand; 4] = array::from_fn(|index| {
        let mut hand = hands[index];
        for card in selections[index] {
            hand.remove(card);
        }
        hand
    });

    for seat in PlayerPosition::LOOP {
        let receiver = pass_target(seat);
        for card in selections[seat.index()] {
            if !next[receiver.index()].add(card) {
                return Err(HandError::invariant(format!(
                    "{receiver} already held passed card {card}"
                )));
            }
        }
    }

    Ok(next)
}
