// Library exports for the minimax Battlesnake
// This allows the replay tool and the integration tests to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod geometry;
pub mod heuristic;
pub mod replay;
pub mod search;
pub mod snapshot;
pub mod types;
