// Error types shared by the search core, the bot and the replay tooling

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnakeError {
    /// The snake we are deciding for is not on the board
    #[error("snake with id '{0}' not found in board state")]
    MissingAgent(String),

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A debug log line that could not be read or parsed
    #[error("log line {line}: {message}")]
    Log { line: usize, message: String },
}
