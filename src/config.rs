// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub scores: ScoresConfig,
    pub fallback: FallbackConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// How opponent replies within one minimizing ply relate to each other
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpponentModel {
    /// Every opponent reply is explored from the ply's parent board
    Independent,
    /// Each explored reply is kept on the board for the replies after it
    Cumulative,
}

/// Search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub depth: u8,
    pub opponent_model: OpponentModel,
    /// With no opponents left, skip the minimizing ply instead of scoring it +inf
    #[serde(default)]
    pub solo_pass_through: bool,
}

/// Evaluation weights
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    pub safe_move_weight: f64,
    pub food_weight: f64,
    pub own_body_penalty: f64,
    pub zero_distance_substitute: f64,
    pub food_short_circuit_value: f64,
}

/// What to answer when the search has no move to offer
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    pub default_direction: Direction,
}

/// Values reported by GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                depth: 5,
                opponent_model: OpponentModel::Independent,
                solo_pass_through: false,
            },
            scores: ScoresConfig {
                safe_move_weight: 2.0,
                food_weight: 2.0,
                own_body_penalty: -10.0,
                zero_distance_substitute: 0.5,
                food_short_circuit_value: 100.0,
            },
            fallback: FallbackConfig {
                default_direction: Direction::Up,
            },
            appearance: AppearanceConfig {
                author: "t-arnold".to_string(),
                color: "#FFAA00".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from `path`, falls back to hardcoded defaults on error
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path.as_ref()).unwrap_or_else(|e| {
            log::warn!(
                "Could not load {} ({}), using hardcoded defaults",
                path.as_ref().display(),
                e
            );
            Self::default_hardcoded()
        })
    }

    /// Attempts to load Snake.toml, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_or_default_from("Snake.toml")
    }
}
