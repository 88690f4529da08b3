//! Console minesweeper: prompts for a board, reveals squares until the
//! player wins or detonates a mine, then offers another round.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use minefield_core::{CellCount, Coord};

use crate::game::{Game, GameOptions};

mod game;
mod input;

#[derive(Debug, Parser)]
#[command(name = "minefield", version, about = "Classic console minesweeper")]
struct Args {
    /// Board size (2-26); prompted for when absent
    #[arg(long)]
    size: Option<Coord>,

    /// Number of mines; prompted for when absent
    #[arg(long)]
    mines: Option<CellCount>,

    /// Seed for a reproducible mine layout
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.tracing_level_filter())
        .init();

    let options = GameOptions {
        size: args.size,
        mines: args.mines,
        seed: args.seed,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game = Game::new(stdin.lock(), stdout.lock(), options);

    match game.run() {
        Ok(()) => ExitCode::SUCCESS,
        // stdin closing mid-prompt is a normal way to quit
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("An error occurred: {err}");
            ExitCode::FAILURE
        }
    }
}
