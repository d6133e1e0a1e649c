use std::collections::VecDeque;
use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use grid_snake::config::{DEFAULT_GRID_SIZE, DEFAULT_MAX_TICKS, GridSize};
use grid_snake::direction::Direction;
use grid_snake::input::GameInput;
use grid_snake::pilot::choose_direction;
use grid_snake::session::GameSession;
use grid_snake::summary::GameSummary;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Runs one Snake game without a screen and prints a JSON summary.
#[derive(Debug, Parser)]
struct Cli {
    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    height: u16,

    /// Stop after this many ticks even if the game is still live.
    #[arg(long = "max-ticks", default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Comma-separated directions, one requested per tick (e.g. `up,up,left`).
    #[arg(long)]
    script: Option<String>,

    /// Do not steer once the script runs out.
    #[arg(long = "no-pilot")]
    no_pilot: bool,

    /// Also print the final game state.
    #[arg(long)]
    state: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let grid = GridSize::new(cli.width, cli.height)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut script = parse_script(cli.script.as_deref().unwrap_or_default());

    info!(seed, width = grid.width, height = grid.height, "starting simulation");
    let mut session = GameSession::new(grid, seed);

    while !session.state().game_over && session.tick_count() < cli.max_ticks {
        if let Some(direction) = script.pop_front() {
            session.apply_input(GameInput::Direction(direction));
        } else if !cli.no_pilot {
            let direction = choose_direction(session.state());
            session.apply_input(GameInput::Direction(direction));
        }

        session.tick();
    }

    let summary = GameSummary::from_session(&session);
    info!(score = summary.score, ticks = summary.ticks, outcome = ?summary.outcome, "simulation finished");

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &summary).context("writing summary")?;
    writeln!(stdout)?;
    if cli.state {
        serde_json::to_writer_pretty(&mut stdout, session.state()).context("writing state")?;
        writeln!(stdout)?;
    }

    Ok(())
}

fn parse_script(raw: &str) -> VecDeque<Direction> {
    raw.split(',')
        .filter(|step| !step.trim().is_empty())
        .filter_map(|step| match step.parse() {
            Ok(direction) => Some(direction),
            Err(error) => {
                warn!(%error, "ignoring script step");
                None
            }
        })
        .collect()
}
