use thiserror::Error;

use super::state::GameStatus;

/// Errors raised by the game core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A configuration value is outside its valid range
    #[error("{field} must be between {min} and {max}, got {value}")]
    Configuration {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// No free cell is left for food
    #[error("no free cell left on a {side}x{side} grid")]
    GridFull { side: usize },

    /// An operation was attempted in a status that does not allow it
    #[error("cannot {operation} while the game is {from:?}")]
    InvalidTransition {
        from: GameStatus,
        operation: &'static str,
    },

    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
}
