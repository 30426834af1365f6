use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use tile2048::config::GameConfig;
use tile2048::engine::{Direction, Grid, DEFAULT_SIZE, DEFAULT_TARGET};
use tile2048::game::{Game, TurnOutcome};
use tile2048::presenter::HeadlessPresenter;
use tile2048::utils::grid_from_str_array;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play 2048 games headlessly and report the results", long_about = None)]
struct Args {
    /// Number of games to play
    #[clap(short, long, default_value_t = 10)]
    episodes: u32,

    /// Base seed; episode N uses seed + N
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// How moves are chosen
    #[clap(short, long, value_enum, default_value_t = Policy::Random)]
    policy: Policy,

    /// Maximum turns per game (0 = unlimited)
    #[clap(short, long, default_value_t = 10_000)]
    max_steps: u32,

    /// Width and height of the board (ignored with --board)
    #[clap(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Tile value that wins the game
    #[clap(short, long, default_value_t = DEFAULT_TARGET)]
    target: u32,

    /// Stop each game when the target is reached instead of playing on
    #[clap(long)]
    stop_at_target: bool,

    /// Start every game from this board (one row per line, `.` or 0 for empty)
    #[clap(long)]
    board: Option<PathBuf>,

    /// Print the final board of each game
    #[clap(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// A random direction among those that change the board
    Random,
    /// Left, Down, Right, Up, over and over
    Cycle,
}

impl Policy {
    fn choose(self, grid: &Grid, rng: &mut SmallRng, step: u32) -> Direction {
        match self {
            Policy::Cycle => Direction::ALL[step as usize % Direction::ALL.len()],
            Policy::Random => {
                let mut directions = Direction::ALL;
                directions.shuffle(rng);
                directions
                    .iter()
                    .copied()
                    .find(|&direction| grid.clone().apply_move(direction).moved)
                    .unwrap_or(directions[0])
            }
        }
    }
}

struct EpisodeResult {
    score: u32,
    max_tile: u32,
    steps: u32,
    won: bool,
}

fn read_board_file(path: &PathBuf) -> Result<Grid> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file {}", path.display()))?;
    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    grid_from_str_array(&lines)
        .with_context(|| format!("Invalid board in {}", path.display()))
}

fn play_episode(
    args: &Args,
    start_board: Option<&Grid>,
    episode: u32,
) -> Result<EpisodeResult> {
    let seed = args.seed.wrapping_add(episode as u64);
    let presenter = HeadlessPresenter::new(!args.stop_at_target);
    let mut game = match start_board {
        Some(board) => {
            let config = GameConfig {
                target: args.target,
                start_tiles: 0,
                seed: Some(seed),
                ..GameConfig::default()
            };
            Game::from_grid(board.clone(), presenter, config)?
        }
        None => {
            let config = GameConfig {
                size: args.size,
                target: args.target,
                seed: Some(seed),
                ..GameConfig::default()
            };
            Game::new(config, presenter)?
        }
    };
    game.start()?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut steps = 0;
    while !game.is_terminated() && (args.max_steps == 0 || steps < args.max_steps) {
        let direction = args.policy.choose(game.grid(), &mut rng, steps);
        let outcome = game.handle_direction(direction)?;
        steps += 1;
        if outcome == TurnOutcome::Won {
            debug!("Episode {} stopped at the target after {} steps", episode, steps);
        }
    }

    if args.verbose {
        println!("{}", game.grid());
    }

    Ok(EpisodeResult {
        score: game.score(),
        max_tile: game.grid().max_tile(),
        steps,
        won: game.has_won(),
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let start_board = args.board.as_ref().map(read_board_file).transpose()?;
    if let Some(path) = &args.board {
        println!("Loaded board from {}\n", path.display());
    }

    info!(
        "Playing {} episodes with the {:?} policy (seed {})",
        args.episodes, args.policy, args.seed
    );

    let mut results = Vec::with_capacity(args.episodes as usize);
    for episode in 0..args.episodes {
        let result = play_episode(&args, start_board.as_ref(), episode)?;
        println!(
            "  Episode {:<4} Score: {:<7} Max Tile: {:<6} Steps: {:<6} {}",
            episode,
            result.score,
            result.max_tile,
            result.steps,
            if result.won { "WON" } else { "" }
        );
        results.push(result);
    }

    if results.is_empty() {
        println!("No episodes played.");
        return Ok(());
    }

    let total_score: u64 = results.iter().map(|r| r.score as u64).sum();
    let best = results.iter().map(|r| r.score).max().unwrap_or(0);
    let best_tile = results.iter().map(|r| r.max_tile).max().unwrap_or(0);
    let wins = results.iter().filter(|r| r.won).count();

    println!("\n--- Summary ---");
    println!("Episodes: {}", results.len());
    println!(
        "Average Score: {:.2}",
        total_score as f64 / results.len() as f64
    );
    println!("Best Score: {}", best);
    println!("Best Tile: {}", best_tile);
    println!(
        "Wins: {} ({:.1}%)",
        wins,
        wins as f64 * 100.0 / results.len() as f64
    );
    Ok(())
}
