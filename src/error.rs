use thiserror::Error;

use crate::constants::MAX_SIZE;

/// Why a move was rejected. A rejected move never changes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: ({x}, {y}) is off the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: suicide")]
    Suicide,
    #[error("illegal move: repeats an earlier position")]
    Superko,
}

/// Errors raised while setting up a board.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("unsupported board size {0}, expected 1..={max}", max = MAX_SIZE)]
    UnsupportedSize(usize),
    #[error("komi must be a finite number, got {0}")]
    InvalidKomi(f32),
    #[error("handicap stones can only be placed before the first move")]
    HandicapAfterStart,
    #[error("{0} handicap stones would fill the board")]
    TooManyHandicapStones(usize),
    #[error("invalid handicap point: {0}")]
    InvalidHandicapPoint(#[from] MoveError),
}
