// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// This file is the home of the Battlesnake endpoints. The actual decision is
// made by the minimax search in search.rs; this layer turns a wire message
// into a snapshot, runs the search and makes sure we always answer with a move.
//
// For more info see docs.battlesnake.com

use log::{error, info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::SnakeError;
use crate::geometry::{is_within_bounds, next_head, safe_directions};
use crate::search::{Minimax, SearchOutcome};
use crate::snapshot::{SnakeAgent, Snapshot};
use crate::types::{Battlesnake, Board, Coord, Direction, Game};

/// Result of one turn's decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Direction we answer with
    pub direction: Direction,
    /// Heuristic value backing the decision (observability only)
    pub value: f64,
    /// Move proposed by the search, None if the fallback was used
    pub searched: Option<Direction>,
    pub nodes: u64,
}

impl Decision {
    pub fn used_fallback(&self) -> bool {
        self.searched.is_none()
    }
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    seed: Option<u64>,
    rng: Mutex<StdRng>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_seed(config, None)
    }

    /// Creates a Bot whose fallback choices are reproducible when `seed` is set
    pub fn with_seed(config: Config, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let debug_logger = if config.debug.enabled {
            DebugLogger::new(&config.debug.log_file_path)
        } else {
            DebugLogger::disabled()
        };

        Bot {
            config,
            seed,
            rng: Mutex::new(rng),
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        if let Some(seed) = self.seed {
            *self.rng.lock() = StdRng::seed_from_u64(seed);
        }
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {}", game.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The search runs on tokio's blocking pool so the HTTP worker is free
    /// while it works. Whatever happens we answer with some direction.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();
        info!("Turn {}: Computing move", turn);

        let search_board = board.clone();
        let you_id = you.id.clone();
        let config = self.config.clone();
        let searched = tokio::task::spawn_blocking(move || {
            Bot::search_turn(&config, &search_board, &you_id)
        })
        .await;

        let outcome = match searched {
            Ok(Ok(outcome)) => Some(outcome),
            Ok(Err(e)) => {
                error!("Turn {}: {}", turn, e);
                None
            }
            Err(e) => {
                error!("Turn {}: search task failed: {}", turn, e);
                None
            }
        };

        let decision = {
            let mut rng = self.rng.lock();
            Self::resolve(&self.config, board, you, outcome, &mut *rng)
        };

        info!(
            "Turn {}: Chose {} (value: {}, depth: {}, nodes: {}, time: {}ms)",
            turn,
            decision.direction,
            decision.value,
            self.config.search.depth,
            decision.nodes,
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(*turn, &you.id, board.clone(), &decision);

        json!({
            "move": decision.direction.as_str(),
            "shout": format!("{:.2}", decision.value),
        })
    }

    /// Synchronous turn decision: search, then fall back if needed.
    /// Used by the replay tooling and anywhere no async runtime is around.
    pub fn decide<R: Rng + ?Sized>(
        config: &Config,
        board: &Board,
        you: &Battlesnake,
        rng: &mut R,
    ) -> Result<Decision, SnakeError> {
        let outcome = Self::search_turn(config, board, &you.id)?;
        Ok(Self::resolve(config, board, you, Some(outcome), rng))
    }

    /// Runs the minimax search for `you_id` on `board`
    pub fn search_turn(
        config: &Config,
        board: &Board,
        you_id: &str,
    ) -> Result<(SearchOutcome, u64), SnakeError> {
        let snapshot = Snapshot::from_board(board, you_id)?;
        let engine = Minimax::new(&config.scores, config.search.opponent_model)
            .with_solo_pass_through(config.search.solo_pass_through);
        let outcome = engine.best_move(&snapshot, config.search.depth);
        Ok((outcome, engine.nodes_searched()))
    }

    /// Turns a search outcome into a direction we can actually send
    fn resolve<R: Rng + ?Sized>(
        config: &Config,
        board: &Board,
        you: &Battlesnake,
        outcome: Option<(SearchOutcome, u64)>,
        rng: &mut R,
    ) -> Decision {
        let (value, searched, nodes) = match outcome {
            Some((outcome, nodes)) => (outcome.value, outcome.best_move, nodes),
            None => (f64::NEG_INFINITY, None, 0),
        };

        let direction = match searched {
            Some(dir) => dir,
            None => {
                let head = you.body.first().copied().unwrap_or(you.head);
                let dir = Self::fallback_direction(
                    board,
                    head,
                    config.fallback.default_direction,
                    rng,
                );
                warn!("No searched move available, falling back to {}", dir);
                dir
            }
        };

        Decision {
            direction,
            value,
            searched,
            nodes,
        }
    }

    /// Random safe direction if there is one, otherwise a random direction
    /// that at least stays on the board, otherwise `default`
    pub fn fallback_direction<R: Rng + ?Sized>(
        board: &Board,
        head: Coord,
        default: Direction,
        rng: &mut R,
    ) -> Direction {
        let snakes: Vec<SnakeAgent> = board
            .snakes
            .iter()
            .map(|s| SnakeAgent::new(s.id.clone(), s.body.clone()))
            .collect();

        let safe = safe_directions(head, &snakes, board.width, board.height);
        if let Some(dir) = safe.choose(&mut *rng) {
            return *dir;
        }

        let in_bounds: Vec<Direction> = Direction::all()
            .into_iter()
            .filter(|&dir| is_within_bounds(next_head(head, dir), board.width, board.height))
            .collect();
        in_bounds.choose(rng).copied().unwrap_or(default)
    }
}
