use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use labyrinth::{Color, GameConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::{play_game, Config, GameResult, Recorder};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// Players per game, between 2 and 4
    #[arg(short = 'p', long, default_value_t = 2)]
    num_players: usize,

    /// How many objectives are dealt, between 16 and 24
    #[arg(short, long, default_value_t = 24)]
    objectives: usize,

    /// Give up on a game after this many turns
    #[arg(short, long, default_value_t = 1000)]
    max_turns: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record each game's actions and final state as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let config = Config {
        game: GameConfig {
            num_players: args.num_players,
            objective_count: args.objectives,
        },
        max_turns: args.max_turns,
    };
    config.game.validate()?;

    let mut results = Vec::with_capacity(args.num_games);
    for game_idx in 0..args.num_games {
        let result = play_game(&config, &mut rng, &mut recorder)?;
        match &result {
            GameResult::WonBy { color, turns } => {
                debug!(winner = %color, turns, game_idx);
            }
            GameResult::Unfinished { turns } => {
                debug!(turns, game_idx, "Unfinished");
            }
            GameResult::IllegalAction { color, turn, err } => {
                warn!(player = %color, turn, game_idx, "Illegal action");
                let mut err_dyn = err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    warn!("{}", err_dyn);
                    err_dyn = src_err;
                }
                warn!("{}", err_dyn);
            }
        }
        results.push(result);
    }

    print_summary(&config, &results);
    Ok(())
}

fn print_summary(config: &Config, results: &[GameResult]) {
    let wins = results.iter().filter_map(GameResult::winner).counts();
    let unfinished = results
        .iter()
        .filter(|result| matches!(result, GameResult::Unfinished { .. }))
        .count();
    let illegal_actions = results.len() - wins.values().sum::<usize>() - unfinished;
    let winning_turns = results
        .iter()
        .filter_map(|result| match result {
            GameResult::WonBy { turns, .. } => Some(*turns),
            _ => None,
        })
        .sorted()
        .collect::<Vec<_>>();

    eprintln!("End result of {} games:", results.len());
    for color in Color::ALL.into_iter().take(config.game.num_players) {
        eprintln!("- {} wins by {}", wins.get(&color).copied().unwrap_or(0), color);
    }
    eprintln!(
        "- {} unfinished after {} turns",
        unfinished, config.max_turns
    );
    if illegal_actions > 0 {
        eprintln!("- {} ended by an illegal action", illegal_actions);
    }
    if !winning_turns.is_empty() {
        eprintln!(
            "Turns to win: min {}, median {}, max {}",
            winning_turns[0],
            winning_turns[winning_turns.len() / 2],
            winning_turns[winning_turns.len() - 1]
        );
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
