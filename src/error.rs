//! errors produced while building and walking mazes
use thiserror::Error;

use crate::types::Position;

/// Everything that can go wrong building a grid or walking it
#[derive(Error, Debug)]
pub enum MazeError {
    /// the maze spec has no `'s'` cell
    #[error("start cell not found in maze")]
    StartNotFound,

    /// a row of the maze spec is a different length from the first row
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        #[allow(missing_docs)]
        row: usize,
        #[allow(missing_docs)]
        expected: usize,
        #[allow(missing_docs)]
        found: usize,
    },

    /// the maze spec's size doesn't fit the chosen [crate::grid::dimensions::Dimensions]
    #[error("a {width}x{height} maze doesn't fit the chosen grid dimensions")]
    DimensionMismatch {
        #[allow(missing_docs)]
        width: usize,
        #[allow(missing_docs)]
        height: usize,
    },

    /// a walk was asked to start outside the grid
    #[error("position {position} is outside the grid")]
    OutOfBounds {
        #[allow(missing_docs)]
        position: Position,
    },

    /// a json maze spec or config couldn't be parsed
    #[error("invalid json: {0}")]
    Spec(#[from] serde_json::Error),
}

#[allow(missing_docs)]
pub type Result<T> = std::result::Result<T, MazeError>;
