//! various types that are useful for working with grid mazes
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::{BoundsMode, Cell};

/// A vector with which to do positional math. Rows grow downwards, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// row offset
    pub row: i64,
    /// column offset
    pub col: i64,
}

/// A (row, column) location in a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// row, increases downwards
    pub row: usize,
    /// column, increases to the right
    pub col: usize,
}

impl Position {
    /// make a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// offsets this position by a vector, returning None if either coordinate would go negative
    pub fn add_vec(&self, v: Vector) -> Option<Position> {
        let row = self.row as i64 + v.row;
        let col = self.col as i64 + v.col;
        if row < 0 || col < 0 {
            return None;
        }
        Some(Position {
            row: row as usize,
            col: col as usize,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid[{}][{}]", self.row, self.col)
    }
}

/// Represents a move from one cell to an orthogonal neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
}

/// the number of moves available from any cell
pub const N_MOVES: usize = 4;

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Left => write!(f, "left"),
            Move::Right => write!(f, "right"),
            Move::Up => write!(f, "up"),
            Move::Down => write!(f, "down"),
        }
    }
}

impl Move {
    /// convert this move to a vector
    pub fn to_vector(self) -> Vector {
        match self {
            Move::Left => Vector { row: 0, col: -1 },
            Move::Right => Vector { row: 0, col: 1 },
            Move::Up => Vector { row: -1, col: 0 },
            Move::Down => Vector { row: 1, col: 0 },
        }
    }

    /// all moves, in the priority order the walker tries them: up, right, down, left
    pub fn all() -> [Move; N_MOVES] {
        [Move::Up, Move::Right, Move::Down, Move::Left]
    }

    /// converts a usize index to a move, in `Move::all()` order. None past the last move
    pub fn from_index(index: usize) -> Option<Move> {
        Move::all().get(index).copied()
    }
}

/// a grid for which the size can be determined
pub trait SizeDeterminableGrid {
    #[allow(missing_docs)]
    fn get_width(&self) -> usize;
    #[allow(missing_docs)]
    fn get_height(&self) -> usize;

    /// is this position inside the grid on both axes
    fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.get_height() && pos.col < self.get_width()
    }
}

/// a grid for which the start cell can be located
pub trait StartLocatableGrid {
    /// the first start cell in row-major order, or None if there isn't one
    fn locate_start(&self) -> Option<Position>;
}

/// a grid which can be asked whether cells are open (passable and unvisited)
pub trait OpenQueryableGrid: SizeDeterminableGrid {
    /// is the cell at `pos` in bounds and open
    fn is_open(&self, pos: Position) -> bool;

    /// pick how the rightward neighbour is bounds checked
    fn set_bounds_mode(&mut self, bounds: BoundsMode);

    /// applies the bounds check for `mv` from `from` and returns the neighbour if it is open
    fn open_neighbor(&self, from: Position, mv: Move) -> Option<Position>;
}

/// a grid whose open cells can be marked with a step count
pub trait MarkableGrid: OpenQueryableGrid {
    /// mark the cell at `pos` as visited at `step`. The cell must be open.
    fn mark(&mut self, pos: Position, step: u32);

    /// look at a single cell
    fn get_cell(&self, pos: Position) -> Option<Cell>;
}
