#![allow(missing_docs)]
//! types to match the json representation of a maze spec
use std::iter::FromIterator;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::dimensions::Dimensions;
use crate::grid::Grid;

/// The rows of the maze every demonstration starts from
pub const CANONICAL_MAZE: [&str; 7] = [
    "#######",
    "#s    #",
    "# #####",
    "#   # #",
    "# ### #",
    "#     #",
    "#######",
];

/// A maze spec as it appears on the wire
///
/// ```
/// use maze_walk_types::wire_representation::MazeSpec;
///
/// let body = r####"{"rows": ["###", "#s#", "###"]}"####;
/// let spec = MazeSpec::from_json(body).unwrap();
/// assert_eq!(spec.rows.len(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MazeSpec {
    pub rows: Vec<String>,
}

impl MazeSpec {
    /// the canonical 7x7 maze
    pub fn canonical() -> Self {
        CANONICAL_MAZE.iter().copied().collect()
    }

    #[allow(missing_docs)]
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// build a fresh mutable grid from this spec. Calling this twice gives two independent grids.
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::build(&self.rows)
    }

    /// like `to_grid` with a chosen dimension representation
    pub fn to_grid_with_dimensions<D: Dimensions>(&self) -> Result<Grid<D>> {
        Grid::build_with_dimensions(&self.rows)
    }
}

impl<S: Into<String>> FromIterator<S> for MazeSpec {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        MazeSpec {
            rows: iter.into_iter().map(Into::into).collect(),
        }
    }
}
