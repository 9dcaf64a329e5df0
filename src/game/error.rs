//! Error types for game module
//!
//! Provides custom error types for game logic including move validation,
//! session state transitions and PGN export.

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Invalid move attempted
    #[error("Invalid move: {message}")]
    InvalidMove { message: String },

    /// Invalid game state transition
    #[error("Invalid game state transition: {message}")]
    InvalidStateTransition { message: String },

    /// PGN file could not be written
    #[error("PGN export failed: {0}")]
    Export(#[from] std::io::Error),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
