use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use hearts_core::model::player::PlayerPosition;
use hearts_table::config::{DealOrder, ResolvedOutputs, TableConfig};
use hearts_table::logging::init_logging;
use hearts_table::runner::TableRunner;

/// Plays seeded hands of Hearts between built-in agents.
#[derive(Debug, Parser)]
#[command(
    name = "hearts-table",
    author,
    version,
    about = "Deterministic single-hand Hearts table"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "tables/default.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of hands to play.
    #[arg(long, value_name = "HANDS")]
    hands: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Deal every hand from the unshuffled deck.
    #[arg(long)]
    sorted: bool,

    /// Exit after validating the configuration (no hands are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = TableConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(hands) = cli.hands {
        config.deals.hands = hands;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    if cli.sorted {
        config.deals.order = DealOrder::Sorted;
    }

    config
        .validate()
        .with_context(|| format!("validating overrides for {}", cli.config.display()))?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let hands = config.deals.hands;

    println!(
        "Loaded configuration '{run_id}' ({hands} hand{}, {:?} deals)",
        if hands == 1 { "" } else { "s" },
        config.deals.order
    );

    if cli.validate_only {
        println!("Validation-only mode: no hands played.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TableRunner::new(config, outputs)?;
    let summary = runner.run()?;

    println!(
        "Run '{run_id}' complete: {} hands played, {} aborted → {}",
        summary.hands_played,
        summary.aborted,
        summary.jsonl_path.display()
    );
    for seat in PlayerPosition::LOOP {
        println!(
            "  {:<5} {:<16} {:>6} points",
            seat.to_string(),
            summary.agent_names[seat.index()],
            summary.totals.score(seat)
        );
    }
    if summary.completed() > 0 {
        let leader = summary.totals.leading_player();
        println!(
            "Lowest total: {} ({})",
            summary.agent_names[leader.index()],
            leader
        );
    }

    Ok(())
}
