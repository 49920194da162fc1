// Depth-limited minimax over alternating plies
//
// A maximizing ply is our snake choosing one of its safe moves. A minimizing
// ply pools every safe move of every opponent and keeps the single worst one
// for us, so the opponents are modelled as one adversary taking one move at a
// time. There is no pruning: the tree is bounded only by depth and by the
// safety filter.

use std::borrow::Cow;
use std::cell::Cell;

use crate::config::{OpponentModel, ScoresConfig};
use crate::geometry::{is_within_bounds, next_head, safe_directions};
use crate::heuristic::evaluate;
use crate::snapshot::Snapshot;
use crate::types::Direction;

/// Value of a subtree and the move that achieves it.
/// `best_move` is only meaningful for the root call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub value: f64,
    pub best_move: Option<Direction>,
}

impl SearchOutcome {
    fn leaf(value: f64) -> Self {
        SearchOutcome {
            value,
            best_move: None,
        }
    }
}

pub struct Minimax<'a> {
    scores: &'a ScoresConfig,
    opponent_model: OpponentModel,
    solo_pass_through: bool,
    nodes: Cell<u64>,
}

impl<'a> Minimax<'a> {
    pub fn new(scores: &'a ScoresConfig, opponent_model: OpponentModel) -> Self {
        Minimax {
            scores,
            opponent_model,
            solo_pass_through: false,
            nodes: Cell::new(0),
        }
    }

    /// Skip the minimizing ply on a board with no opponents instead of
    /// scoring it `+inf`
    pub fn with_solo_pass_through(mut self, enabled: bool) -> Self {
        self.solo_pass_through = enabled;
        self
    }

    /// Number of nodes visited since this engine was created
    pub fn nodes_searched(&self) -> u64 {
        self.nodes.get()
    }

    /// Best move for our snake looking `depth` plies ahead
    pub fn best_move(&self, snapshot: &Snapshot, depth: u8) -> SearchOutcome {
        self.search(snapshot, depth, true)
    }

    pub fn search(&self, snapshot: &Snapshot, depth: u8, maximizing: bool) -> SearchOutcome {
        self.nodes.set(self.nodes.get() + 1);

        if depth == 0 {
            return SearchOutcome::leaf(evaluate(snapshot, self.scores));
        }

        if maximizing {
            self.maximize(snapshot, depth)
        } else {
            self.minimize(snapshot, depth)
        }
    }

    fn maximize(&self, snapshot: &Snapshot, depth: u8) -> SearchOutcome {
        let me = snapshot.own_snake();
        let mut best = SearchOutcome::leaf(f64::NEG_INFINITY);

        for dir in safe_directions(me.head, snapshot.snakes(), snapshot.width, snapshot.height) {
            let candidate = next_head(me.head, dir);

            // Reachable food dominates everything else; first match wins
            if snapshot.has_food_at(&candidate) {
                return SearchOutcome {
                    value: self.scores.food_short_circuit_value,
                    best_move: Some(dir),
                };
            }

            if !is_within_bounds(candidate, snapshot.width, snapshot.height) {
                continue;
            }

            let child = snapshot.apply_move(snapshot.own_id(), candidate);
            let value = self.search(&child, depth - 1, false).value;
            if value > best.value {
                best = SearchOutcome {
                    value,
                    best_move: Some(dir),
                };
            }
        }

        best
    }

    fn minimize(&self, snapshot: &Snapshot, depth: u8) -> SearchOutcome {
        let opponents = snapshot.opponent_ids();

        // Solo board: an empty minimum stays +inf unless we hand the turn back
        if opponents.is_empty() && self.solo_pass_through {
            return self.search(snapshot, depth - 1, true);
        }

        let mut best = SearchOutcome::leaf(f64::INFINITY);
        // Stays borrowed unless replies accumulate
        let mut working: Cow<'_, Snapshot> = Cow::Borrowed(snapshot);

        for opponent_id in &opponents {
            let Some(opponent) = working.snake(opponent_id) else {
                continue;
            };
            let moves = safe_directions(
                opponent.head,
                working.snakes(),
                working.width,
                working.height,
            );

            for dir in moves {
                let Some(head) = working.snake(opponent_id).map(|s| s.head) else {
                    continue;
                };
                let candidate = next_head(head, dir);
                if !is_within_bounds(candidate, working.width, working.height) {
                    continue;
                }

                let child = working.apply_move(opponent_id, candidate);
                let value = self.search(&child, depth - 1, true).value;
                if value < best.value {
                    best = SearchOutcome {
                        value,
                        best_move: Some(dir),
                    };
                }

                if self.opponent_model == OpponentModel::Cumulative {
                    working = Cow::Owned(child);
                }
            }
        }

        best
    }
}
