// Debug logging module for asynchronous game state logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's decision is written as one
// line of a JSONL file, which the replay tool can read back.

use log::error;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::bot::Decision;
use crate::types::{Board, Direction};

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    /// Snake the decision was made for; older logs may not carry it
    #[serde(default)]
    pub you_id: Option<String>,
    pub chosen_move: Direction,
    /// Search value, None when it was not finite
    #[serde(default)]
    pub value: Option<f64>,
    pub board: Board,
    pub timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger, truncating the log file if it exists.
    /// Falls back to a disabled logger if the file cannot be created.
    pub fn new(log_file_path: &str) -> Self {
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(File::from_std(file)))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(&self, turn: i32, you_id: &str, board: Board, decision: &Decision) {
        if !self.enabled {
            return;
        }

        let entry = LogEntry {
            turn,
            you_id: Some(you_id.to_string()),
            chosen_move: decision.direction,
            value: decision.value.is_finite().then_some(decision.value),
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file_handle = self.file.clone();

        // Spawn fire-and-forget task
        tokio::spawn(async move {
            Self::log_move_internal(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn log_move_internal(file_handle: Arc<Mutex<Option<File>>>, entry: LogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_parses_without_optional_fields() {
        let line = r#"{"turn":4,"chosen_move":"left","board":{"height":11,"width":11,"food":[],"snakes":[],"hazards":[]},"timestamp":"2024-01-01T00:00:00Z"}"#;
        let entry: LogEntry = serde_json::from_str(line).unwrap();
        assert_eq!(entry.turn, 4);
        assert_eq!(entry.chosen_move, Direction::Left);
        assert_eq!(entry.you_id, None);
        assert_eq!(entry.value, None);
    }

    #[test]
    fn test_disabled_logger_is_noop() {
        let logger = DebugLogger::disabled();
        assert!(!logger.is_enabled());
    }

    #[tokio::test]
    async fn test_logged_move_is_written_as_jsonl() {
        let path = std::env::temp_dir().join(format!(
            "minimax_snake_debug_{}.jsonl",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();
        let logger = DebugLogger::new(&path_str);
        assert!(logger.is_enabled());

        let board = Board {
            height: 11,
            width: 11,
            food: vec![],
            snakes: vec![],
            hazards: vec![],
        };
        let decision = Decision {
            direction: Direction::Down,
            value: 7.5,
            searched: Some(Direction::Down),
            nodes: 3,
        };
        logger.log_move(2, "me", board, &decision);

        // Wait for the spawned write; taking the lock orders us after it
        for _ in 0..50 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            let _guard = logger.file.lock().await;
            let contents = std::fs::read_to_string(&path).unwrap_or_default();
            if !contents.is_empty() {
                let entry: LogEntry = serde_json::from_str(contents.trim()).unwrap();
                assert_eq!(entry.turn, 2);
                assert_eq!(entry.you_id.as_deref(), Some("me"));
                assert_eq!(entry.chosen_move, Direction::Down);
                assert_eq!(entry.value, Some(7.5));
                let _ = std::fs::remove_file(&path);
                return;
            }
        }
        panic!("debug log entry was never written");
    }
}
