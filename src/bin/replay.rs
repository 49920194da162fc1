// Standalone replay tool for analyzing Battlesnake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Examples:
//   replay battlesnake_debug.jsonl --all
//   replay battlesnake_debug.jsonl --turns 5,10,15
//   replay battlesnake_debug.jsonl --validate 5:up,10:right|left
//   replay battlesnake_debug.jsonl --all --verbose

use clap::Parser;
use std::path::PathBuf;
use std::process;

use minimax_snake::config::Config;
use minimax_snake::replay::{parse_expected_moves, ReplayEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Battlesnake Replay Tool")]
struct Args {
    /// JSONL debug log written by the server
    log_file: PathBuf,

    /// Replay all turns in the log
    #[arg(long, conflicts_with_all = ["turns", "validate"])]
    all: bool,

    /// Replay specific turns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    turns: Vec<i32>,

    /// Validate logged moves (format: turn:move|move,...)
    #[arg(long)]
    validate: Option<String>,

    /// Show detailed output for each turn
    #[arg(long)]
    verbose: bool,

    /// Seed for the fallback random source
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Path to Snake.toml
    #[arg(long, default_value = "Snake.toml")]
    config: PathBuf,
}

fn main() {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();

    let config = Config::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Warning: {}, using hardcoded defaults", e);
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, args.verbose).with_seed(args.seed);

    let entries = match engine.load_log_file(&args.log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if let Some(spec) = &args.validate {
        let expected = match parse_expected_moves(spec) {
            Ok(expected) => expected,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

        match engine.validate_expected_moves(&entries, &expected) {
            Ok(()) => {
                println!("✓ All {} expected moves validated", expected.len());
            }
            Err(e) => {
                eprintln!("✗ Validation failed: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let results = if args.all || args.turns.is_empty() {
        engine.replay_all(&entries)
    } else {
        match engine.replay_turns(&entries, &args.turns) {
            Ok(results) => results,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    };

    engine.print_report(&results);
}
