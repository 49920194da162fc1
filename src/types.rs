// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SnakeError;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    #[serde(default)]
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Straight-line distance, used by the food term of the heuristic
    pub fn euclidean_distance(&self, other: &Coord) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions in move-generation order.
    /// Ties in the search resolve to whichever direction comes first here.
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Unit step for this direction. Up increases y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        let (dx, dy) = self.delta();
        Coord {
            x: coord.x + dx,
            y: coord.y + dy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SnakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(SnakeError::InvalidDirection(s.to_string())),
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parses_case_insensitively() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("Down".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!(" LEFT ".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("right".parse::<Direction>().unwrap(), Direction::Right);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
    }

    #[test]
    fn test_euclidean_distance() {
        let a = Coord::new(0, 0);
        assert_eq!(a.euclidean_distance(&Coord::new(3, 4)), 5.0);
        assert_eq!(a.euclidean_distance(&a), 0.0);
    }

    #[test]
    fn test_game_state_parses_minimal_wire_message() {
        let raw = r#"{
            "game": {"id": "g1", "ruleset": {"name": "standard"}, "timeout": 500},
            "turn": 3,
            "board": {
                "height": 11, "width": 11,
                "food": [{"x": 1, "y": 2}],
                "snakes": [{"id": "me", "body": [{"x": 5, "y": 5}], "head": {"x": 5, "y": 5}}]
            },
            "you": {"id": "me", "body": [{"x": 5, "y": 5}], "head": {"x": 5, "y": 5}}
        }"#;

        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.turn, 3);
        assert_eq!(state.board.food, vec![Coord::new(1, 2)]);
        assert!(state.board.hazards.is_empty());
        assert_eq!(state.you.id, "me");
    }
}
