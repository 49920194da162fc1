// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the search on historical states
// 3. Compare logged vs replayed moves
// 4. Generate a summary report

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::{Bot, Decision};
use crate::config::Config;
use crate::debug_logger::LogEntry;
use crate::error::SnakeError;
use crate::types::{Battlesnake, Board, Direction};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub replayed_value: f64,
    pub used_fallback: bool,
    pub nodes: u64,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
    seed: u64,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            config,
            verbose,
            seed: 0,
        }
    }

    /// Seed for the fallback random source, reset before every replayed turn
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, SnakeError> {
        let file = File::open(log_path.as_ref())?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| SnakeError::Log {
                line: line_num + 1,
                message: e.to_string(),
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| SnakeError::Log {
                line: line_num + 1,
                message: e.to_string(),
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Runs the decision logic on a single board state for `our_snake_id`
    ///
    /// A log entry only keeps the board, so a turn where our snake was not on
    /// it cannot be replayed: the live bot answered from the request's `you`,
    /// which the log does not record. Such turns fail with `MissingAgent` and
    /// are skipped by `replay_all`.
    pub fn replay_turn(&self, board: &Board, our_snake_id: &str) -> Result<Decision, SnakeError> {
        let you: &Battlesnake = board
            .snakes
            .iter()
            .find(|s| s.id == our_snake_id)
            .ok_or_else(|| SnakeError::MissingAgent(our_snake_id.to_string()))?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        Bot::decide(&self.config, board, you, &mut rng)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, SnakeError> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        // Older logs carry no id; assume the first snake made the logged move
        let our_snake_id = match &entry.you_id {
            Some(id) => id.clone(),
            None => entry
                .board
                .snakes
                .first()
                .map(|s| s.id.clone())
                .ok_or_else(|| SnakeError::MissingAgent(String::new()))?,
        };

        let start_time = Instant::now();
        let decision = self.replay_turn(&entry.board, &our_snake_id)?;
        let computation_time = start_time.elapsed().as_millis();

        let matches = entry.chosen_move == decision.direction;
        let result = ReplayResult {
            turn: entry.turn,
            original_move: entry.chosen_move,
            replayed_move: decision.direction,
            matches,
            replayed_value: decision.value,
            used_fallback: decision.used_fallback(),
            nodes: decision.nodes,
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} (value: {}, nodes: {}, time: {}ms)",
                    entry.turn, decision.direction, decision.value, decision.nodes, computation_time
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {}, Replayed: {} (value: {}, nodes: {}, time: {}ms)",
                    entry.turn,
                    entry.chosen_move,
                    decision.direction,
                    decision.value,
                    decision.nodes,
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file, skipping turns that fail
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, SnakeError> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| SnakeError::Log {
                    line: 0,
                    message: format!("turn {} not found in log file", turn_num),
                })?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Search Depth:   {}", self.config.search.depth);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 =
                results.iter().map(|r| r.nodes as f64).sum::<f64>() / results.len() as f64;
            let fallbacks = results.iter().filter(|r| r.used_fallback).count();

            println!("Average Nodes Searched:     {:.1}", avg_nodes);
            println!("Average Computation Time:   {:.1}ms", avg_time);
            println!("Fallback Moves:             {}\n", fallbacks);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (value: {}, nodes: {}, time: {}ms)",
                    result.turn,
                    result.original_move,
                    result.replayed_move,
                    result.replayed_value,
                    result.nodes,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that the logged moves are among the acceptable ones
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}

/// Parses `turn:move|move,turn:move` into acceptable moves per turn
pub fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'turn:move'", pair))?;

            let turn = turn
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;

            // Support multiple acceptable moves separated by '|'
            let moves = moves
                .split('|')
                .map(|m| m.parse::<Direction>().map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}
