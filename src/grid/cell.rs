use serde::{Deserialize, Serialize};

/// marker character for a wall
pub const WALL: char = '#';
/// marker character for the start cell
pub const START: char = 's';
/// marker character for an open cell
pub const OPEN: char = ' ';

/// A single cell of a maze
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// impassable, never changes
    Wall,
    /// where the walk begins, never changes
    Start,
    /// passable and not yet visited
    Open,
    /// passable and reached at the given step
    Visited(u32),
    /// any other character from the maze spec, kept as is
    Other(char),
}

impl Cell {
    /// parse a single spec character
    pub fn from_char(c: char) -> Self {
        match c {
            WALL => Cell::Wall,
            START => Cell::Start,
            OPEN => Cell::Open,
            other => Cell::Other(other),
        }
    }

    /// the character this cell renders as. visited cells show the last digit of their step
    pub fn as_char(&self) -> char {
        match self {
            Cell::Wall => WALL,
            Cell::Start => START,
            Cell::Open => OPEN,
            Cell::Other(c) => *c,
            Cell::Visited(step) => std::char::from_digit(step % 10, 10).unwrap_or('?'),
        }
    }

    #[allow(missing_docs)]
    pub fn is_open(&self) -> bool {
        *self == Cell::Open
    }

    #[allow(missing_docs)]
    pub fn is_visited(&self) -> bool {
        matches!(self, Cell::Visited(_))
    }

    /// the step this cell was reached at, if it has been visited
    pub fn step(&self) -> Option<u32> {
        match self {
            Cell::Visited(step) => Some(*step),
            _ => None,
        }
    }
}
