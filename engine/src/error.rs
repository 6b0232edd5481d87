//! Engine-level errors.

use std::error::Error;
use std::fmt;

use othello_core::GameError;

/// Every recoverable failure the engine surface can report. Callers get an
/// `Err` and the engine stays usable; nothing here panics or poisons state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Engine construction failed, typically the worker pool.
    Initialization(String),
    /// A request was malformed: mismatched batch lengths, an out-of-range
    /// cell byte, an unknown coefficient preset.
    InvalidInput(String),
    /// The requested move is not legal for the requesting player.
    IllegalMove,
    /// A batch exceeded the fixed per-call state limit.
    BatchTooLarge { requested: usize, limit: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Initialization(reason) => {
                write!(f, "engine initialization failed: {}", reason)
            }
            EngineError::InvalidInput(reason) => write!(f, "invalid input: {}", reason),
            EngineError::IllegalMove => write!(f, "illegal move"),
            EngineError::BatchTooLarge { requested, limit } => {
                write!(f, "batch of {} states exceeds the limit of {}", requested, limit)
            }
        }
    }
}

impl Error for EngineError {}

impl From<GameError> for EngineError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::IllegalMove => EngineError::IllegalMove,
            GameError::InvalidCell { value } => {
                EngineError::InvalidInput(format!("invalid cell value: {}", value))
            }
        }
    }
}
