use crate::game::error::HandError;
use crate::model::player::PlayerPosition;
use std::time::{Duration, Instant};

/// Engine-level knobs. Rules themselves are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    turn_budget: Option<Duration>,
}

impl EngineConfig {
    pub const fn new() -> Self {
        Self { turn_budget: None }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn with_turn_budget(mut self, budget: Option<Duration>) -> Self {
        self.turn_budget = budget;
        self
    }

    pub const fn turn_budget(&self) -> Option<Duration> {
        self.turn_budget
    }

    /// Runs one agent decision and enforces the turn budget once it returns.
    /// Agents are synchronous, so an overrun is detected rather than
    /// interrupted.
    pub fn guard<T, F>(&self, seat: PlayerPosition, decide: F) -> Result<T, HandError>
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let value = decide();
        let elapsed = start.elapsed();
        match self.turn_budget {
            Some(budget) if elapsed > budget => Err(HandError::AgentTimeout {
                seat,
                elapsed,
                budget,
            }),
            _ => Ok(value),
        }
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let turn_budget = read("HEARTS_TURN_BUDGET_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Self { turn_budget }
    }
}
