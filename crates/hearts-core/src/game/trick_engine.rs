use crate::game::agent::{PlayContext, Seats};
use crate::game::config::EngineConfig;
use crate::game::error::HandError;
use crate::game::legal::legal_moves;
use crate::model::hand::Hand;
use crate::model::history::GameHistory;
use crate::model::player::PlayerPosition;
use crate::model::trick::{Trick, TrickError};
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickState {
    AwaitingPlay(PlayerPosition),
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickResult {
    pub trick: Trick,
    pub hearts_broken: bool,
}

/// Drives a single trick from the lead to the fourth card.
///
/// The engine borrows `hearts_broken` from its caller and hands the updated
/// value back in [`TrickResult`]; it never owns hand-wide state.
#[derive(Debug, Clone)]
pub struct TrickEngine {
    trick: Trick,
    hearts_broken: bool,
    first_trick: bool,
    state: TrickState,
}

impl TrickEngine {
    pub fn new(leader: PlayerPosition, hearts_broken: bool, first_trick: bool) -> Self {
        Self {
            trick: Trick::new(leader),
            hearts_broken,
            first_trick,
            state: TrickState::AwaitingPlay(leader),
        }
    }

    pub fn state(&self) -> TrickState {
        self.state
    }

    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    /// Asks the seat on turn for a card, checks it and records it.
    pub fn step(
        &mut self,
        hands: &mut [Hand; 4],
        agents: &mut Seats,
        history: &GameHistory,
        config: &EngineConfig,
    ) -> Result<TrickState, HandError> {
        let seat = match self.state {
            TrickState::AwaitingPlay(seat) => seat,
            TrickState::Complete => return Err(TrickError::TrickComplete.into()),
        };

        let trick_so_far = self.trick.cards();
        let hand = &hands[seat.index()];
        let ctx = PlayContext {
            seat,
            hand,
            trick_so_far: &trick_so_far,
            hearts_broken: self.hearts_broken,
            history,
        };
        let agent = &mut agents[seat.index()];
        let card = config.guard(seat, || agent.play(&ctx))?;

        let legal = legal_moves(hand, &trick_so_far, self.hearts_broken, self.first_trick);
        if !legal.contains(&card) {
            return Err(HandError::IllegalMove { seat, card, legal });
        }

        if !hands[seat.index()].remove(card) {
            return Err(HandError::invariant(format!(
                "{seat} was allowed to play {card} without holding it"
            )));
        }
        self.trick.play(seat, card)?;
        if card.suit.is_heart() && !self.hearts_broken {
            self.hearts_broken = true;
            event!(target: "hearts_core::trick", Level::DEBUG, seat = %seat, card = %card, "hearts broken");
        }

        event!(
            target: "hearts_core::trick",
            Level::DEBUG,
            seat = %seat,
            card = %card,
            position_in_trick = trick_so_far.len() + 1,
            "card played"
        );

        self.state = if self.trick.is_complete() {
            TrickState::Complete
        } else {
            TrickState::AwaitingPlay(seat.next())
        };
        Ok(self.state)
    }

    pub fn run(
        mut self,
        hands: &mut [Hand; 4],
        agents: &mut Seats,
        history: &GameHistory,
        config: &EngineConfig,
    ) -> Result<TrickResult, HandError> {
        while let TrickState::AwaitingPlay(_) = self.state {
            self.step(hands, agents, history, config)?;
        }
        self.finish()
    }

    pub fn finish(self) -> Result<TrickResult, HandError> {
        match self.state {
            TrickState::Complete => Ok(TrickResult {
                trick: self.trick,
                hearts_broken: self.hearts_broken,
            }),
            TrickState::AwaitingPlay(seat) => Err(HandError::invariant(format!(
                "trick finished while still waiting on {seat}"
            ))),
        }
    }
}
