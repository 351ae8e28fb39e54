use thiserror::Error;

/// Precondition failures raised while building a board.
///
/// Gameplay transitions never fail: a disallowed move returns the board
/// unchanged. Only generation can be handed arguments that describe no valid
/// game at all.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board of {rows}x{cols} cells is too large")]
    BoardTooLarge { rows: usize, cols: usize },
    #[error("Too many mines: requested {requested}, only {available} cells available")]
    TooManyMines { requested: usize, available: usize },
    #[error("Invalid coordinates ({row}, {col})")]
    InvalidCoords { row: usize, col: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
