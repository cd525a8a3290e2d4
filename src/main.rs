//! Baduk: a Go rules engine.
//!
//! ## Usage
//!
//! - `baduk` - Show a demo
//! - `baduk demo` - Play a short scripted game and score it
//! - `baduk playout --size 9 --games 10` - Run seeded random playouts

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use baduk::board::Board;
use baduk::constants::{DEFAULT_KOMI, MAX_PLAYOUT_MOVES};
use baduk::grid::Color;
use baduk::playout::random_playout;

/// Baduk: a Go rules engine
#[derive(Parser)]
#[command(name = "baduk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short scripted game and print the result
    Demo,
    /// Run random playouts and report the results
    Playout {
        /// Board size
        #[arg(long, default_value_t = 9)]
        size: usize,
        /// Compensation points for White
        #[arg(long, default_value_t = DEFAULT_KOMI)]
        komi: f32,
        /// Seed for the move generator
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Playout {
            size,
            komi,
            seed,
            games,
        }) => run_playouts(size, komi, seed, games),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() -> Result<()> {
    println!("Baduk: Go rules engine\n");

    let mut board = Board::new(9, DEFAULT_KOMI)?;
    for (x, y) in [(2, 2), (6, 6), (3, 2), (6, 5), (2, 3), (5, 6)] {
        let outcome = board.try_play(x, y)?;
        println!(
            "{} at ({x},{y}): group of {}, {} liberties",
            outcome.color, outcome.group_size, outcome.liberties
        );
    }

    let analysis = board.is_valid_move(4, 4);
    println!("Black at (4,4) would leave {} liberties", analysis.liberties);

    board.pass();
    board.pass();
    let score = board.score();
    println!(
        "Black {:.1} - White {:.1}: {}",
        score.black,
        score.white,
        describe(score.winner())
    );
    Ok(())
}

fn run_playouts(size: usize, komi: f32, seed: u64, games: usize) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut wins = [0usize; 2];

    for game in 0..games {
        let mut board = Board::new(size, komi)?;
        let result = random_playout(&mut board, &mut rng, MAX_PLAYOUT_MOVES);
        println!(
            "game {}: {} moves, B {:.1} W {:.1}, {}",
            game + 1,
            result.moves_played,
            result.score.black,
            result.score.white,
            describe(result.winner)
        );
        match result.winner {
            Some(Color::Black) => wins[0] += 1,
            Some(Color::White) => wins[1] += 1,
            None => {}
        }
    }

    println!("Black won {}, White won {} of {games}", wins[0], wins[1]);
    Ok(())
}

fn describe(winner: Option<Color>) -> String {
    match winner {
        Some(color) => format!("{color} wins"),
        None => "draw".to_string(),
    }
}
