use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hearts_bot::build_agent;
use hearts_core::game::serialization::HandRecord;
use hearts_core::game::{EngineConfig, HandEngine, Seats};
use hearts_core::model::deck::{DeckSource, ShuffledDecks, SortedDecks};
use hearts_core::model::player::PlayerPosition;
use hearts_core::model::score::ScoreBoard;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{DealOrder, ResolvedOutputs, SEAT_COUNT, TableConfig};

/// Plays a series of independent hands and streams one JSON record per hand.
pub struct TableRunner {
    config: TableConfig,
    outputs: ResolvedOutputs,
    engine_config: EngineConfig,
}

/// Summary details returned after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub hands_played: usize,
    pub aborted: usize,
    pub agent_names: [String; 4],
    /// Cumulative hand scores of the completed hands.
    pub totals: ScoreBoard,
    pub jsonl_path: PathBuf,
}

impl RunSummary {
    pub fn completed(&self) -> usize {
        self.hands_played - self.aborted
    }
}

impl TableRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: TableConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.agents.len() != SEAT_COUNT {
            return Err(RunnerError::SeatCount {
                found: config.agents.len(),
            });
        }

        Ok(Self {
            engine_config: config.engine_config(),
            config,
            outputs,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Execute every configured hand, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);

        let seed = self.config.deals.seed.unwrap_or(0);
        let mut decks: Box<dyn DeckSource> = match self.config.deals.order {
            DealOrder::Shuffled => Box::new(ShuffledDecks::with_seed(seed)),
            DealOrder::Sorted => Box::new(SortedDecks),
        };
        let mut agent_seeds = StdRng::seed_from_u64(seed);
        let mut totals = ScoreBoard::new();
        let mut aborted = 0usize;

        for hand_index in 0..self.config.deals.hands {
            let deck = decks.next_deck();
            let mut engine = HandEngine::with_config(
                self.build_seats(agent_seeds.next_u64()),
                self.engine_config,
            );
            let result = engine.play_hand(&deck);
            let record = HandRecord::capture(hand_index, &deck, &result);

            match &result {
                Ok(outcome) => {
                    totals.add_totals(outcome.scores);
                    event!(
                        target: "hearts_table::runner",
                        Level::INFO,
                        run_id = %self.config.run_id,
                        hand_index = hand_index as u32,
                        scores = ?outcome.scores,
                        moon_shooter = ?outcome.moon_shooter,
                    );
                }
                Err(err) => {
                    aborted += 1;
                    event!(
                        target: "hearts_table::runner",
                        Level::WARN,
                        run_id = %self.config.run_id,
                        hand_index = hand_index as u32,
                        seat = ?err.seat(),
                        error = %err,
                        "hand aborted"
                    );
                }
            }

            serde_json::to_writer(&mut writer, &record)?;
            writer.write_all(b"\n")?;
        }

        writer.flush()?;

        Ok(RunSummary {
            hands_played: self.config.deals.hands,
            aborted,
            agent_names: self.agent_names(),
            totals,
            jsonl_path: self.outputs.jsonl.clone(),
        })
    }

    /// Fresh agents for one hand. A configured agent seed pins that seat's
    /// stream; otherwise the seat draws from the per-hand seed.
    fn build_seats(&self, hand_seed: u64) -> Seats {
        PlayerPosition::LOOP.map(|seat| {
            let agent = &self.config.agents[seat.index()];
            let seed = agent
                .seed
                .unwrap_or(hand_seed)
                .wrapping_add(seat.index() as u64);
            build_agent(agent.kind, agent.name.clone(), seed)
        })
    }

    fn agent_names(&self) -> [String; 4] {
        PlayerPosition::LOOP.map(|seat| self.config.agents[seat.index()].name.clone())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize hand record: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("configuration requires exactly 4 agents but found {found}")]
    SeatCount { found: usize },
}
