//! Error types for the oxo crate

use thiserror::Error;

/// Main error type for the oxo crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is out of range or already occupied")]
    InvalidMove { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("no moves available on a full board")]
    NoMovesAvailable,

    #[error("not your turn: an AI reply is pending")]
    NotYourTurn,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("board string has wrong length: expected {expected} cells, got {got}")]
    InvalidBoardLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCellCharacter { character: char, position: usize },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
