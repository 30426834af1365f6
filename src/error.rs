//! Error taxonomy shared by the grid engine, the controller and the board parser.

use thiserror::Error;

/// Everything that can go wrong while building or playing a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A tile spawn was requested on a grid with no empty cell.
    /// Callers are expected to check `Grid::has_empty_cells` or the `moved` flag first.
    #[error("no empty cell available to spawn a tile")]
    NoEmptyCell,

    /// A key name that is not bound to any direction.
    #[error("unrecognized direction key '{0}'")]
    InvalidDirection(String),

    #[error("grid size must be at least {min}, got {size}")]
    InvalidSize { size: usize, min: usize },

    #[error("target must be a power of two of at least 4, got {0}")]
    InvalidTarget(u32),

    /// A row whose length does not match the number of rows.
    #[error("row {row} has {len} cells (expected {expected})")]
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A cell that is neither empty nor a power of two of at least 2.
    #[error("invalid tile value {value} at row {row} col {col}")]
    InvalidTile { row: usize, col: usize, value: u32 },

    #[error("unrecognized token '{token}' at row {row} col {col}")]
    InvalidToken {
        row: usize,
        col: usize,
        token: String,
    },
}
