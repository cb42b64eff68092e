//! The grid model: a maze as a rectangle of tagged cells which doubles as the visited set
//! while a walk is running.
//!
//! you almost certainly want to build a [Grid] with [Grid::build], then hand it to
//! [crate::walk::explore].
use std::collections::VecDeque;
use std::fmt::{self, Display};

use fxhash::FxHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MazeError, Result};
use crate::types::{
    MarkableGrid, Move, OpenQueryableGrid, Position, SizeDeterminableGrid, StartLocatableGrid,
};

mod cell;
pub mod dimensions;

pub use cell::{Cell, OPEN, START, WALL};
use dimensions::{Custom, Dimensions};

/// How the rightward neighbour is bounds checked
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsMode {
    /// the column is compared against the width of the grid
    Corrected,
    /// the column is compared against the number of rows, the legacy behaviour.
    /// Only differs from `Corrected` on grids that aren't square.
    Legacy,
}

impl Default for BoundsMode {
    fn default() -> Self {
        BoundsMode::Corrected
    }
}

/// A maze, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<D: Dimensions = Custom> {
    cells: Vec<Cell>,
    dimensions: D,
    bounds: BoundsMode,
}

impl Grid {
    /// Builds a grid from rows of spec characters: `'#'` is a wall, `'s'` the start and `' '`
    /// open. Any other character is kept as an opaque cell that is never open.
    ///
    /// ```
    /// use maze_walk_types::grid::{Cell, Grid};
    /// use maze_walk_types::types::{MarkableGrid, Position};
    ///
    /// let grid = Grid::build(&["###", "#s#", "# #"]).unwrap();
    /// assert_eq!(grid.get_cell(Position::new(2, 1)), Some(Cell::Open));
    /// ```
    pub fn build<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with_dimensions(rows)
    }
}

impl<D: Dimensions> Grid<D> {
    /// Like [Grid::build] but lets you pick the dimension representation, e.g.
    /// [dimensions::CanonicalMaze]. Every row must be as long as the first one.
    pub fn build_with_dimensions<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (row, line) in rows.into_iter().enumerate() {
            let row_cells = line.as_ref().chars().map(Cell::from_char).collect_vec();
            let expected = *width.get_or_insert(row_cells.len());
            if row_cells.len() != expected {
                return Err(MazeError::RaggedRow {
                    row,
                    expected,
                    found: row_cells.len(),
                });
            }
            cells.extend(row_cells);
            height += 1;
        }

        let width = width.unwrap_or(0);
        let dimensions = match D::from_dimensions(width, height) {
            Some(dimensions) => dimensions,
            None => return Err(MazeError::DimensionMismatch { width, height }),
        };
        debug!(width, height, "built grid");
        Ok(Grid {
            cells,
            dimensions,
            bounds: BoundsMode::default(),
        })
    }

    /// switch how rightward moves are bounds checked
    pub fn with_bounds_mode(mut self, bounds: BoundsMode) -> Self {
        self.bounds = bounds;
        self
    }

    #[allow(missing_docs)]
    pub fn bounds_mode(&self) -> BoundsMode {
        self.bounds
    }

    #[allow(missing_docs)]
    pub fn dimensions(&self) -> D {
        self.dimensions
    }

    /// the first start cell in row-major order, or a [MazeError::StartNotFound]
    pub fn start(&self) -> Result<Position> {
        self.locate_start().ok_or(MazeError::StartNotFound)
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row * self.dimensions.width() + pos.col)
        } else {
            None
        }
    }

    fn position_of(&self, index: usize) -> Position {
        let width = self.dimensions.width();
        Position::new(index / width, index % width)
    }

    /// every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (height, width) = (self.dimensions.height(), self.dimensions.width());
        (0..height)
            .cartesian_product(0..width)
            .map(|(row, col)| Position::new(row, col))
    }

    /// the cells of a single row
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let width = self.dimensions.width();
        if row < self.dimensions.height() {
            Some(&self.cells[row * width..(row + 1) * width])
        } else {
            None
        }
    }

    #[allow(missing_docs)]
    pub fn count_open(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    #[allow(missing_docs)]
    pub fn count_visited(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visited()).count()
    }

    /// positions of every visited cell along with the step it was reached at
    pub fn visited(&self) -> Vec<(Position, u32)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.step().map(|step| (self.position_of(i), step)))
            .collect()
    }

    /// All currently open cells connected to `from` through other open cells. `from` itself
    /// is only included when it is open. This looks at every direction with full bounds
    /// checks regardless of [BoundsMode].
    pub fn reachable_from(&self, from: Position) -> FxHashSet<Position> {
        let mut seen = FxHashSet::default();
        if !self.in_bounds(from) {
            return seen;
        }
        if self.is_open(from) {
            seen.insert(from);
        }

        let mut queue = VecDeque::new();
        queue.push_back(from);
        while let Some(pos) = queue.pop_front() {
            for mv in Move::all() {
                let next = match pos.add_vec(mv.to_vector()) {
                    Some(next) => next,
                    None => continue,
                };
                if self.is_open(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Resets every visited cell back to open so the maze can be walked again
    pub fn clear_visits(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_visited()) {
            *cell = Cell::Open;
        }
    }

    /// one line per row, see [Cell::as_char]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<D: Dimensions> Display for Grid<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = (0..self.dimensions.height())
            .filter_map(|r| self.row(r))
            .map(|row| row.iter().map(Cell::as_char).collect::<String>())
            .join("\n");
        write!(f, "{}", rendered)
    }
}

impl<D: Dimensions> SizeDeterminableGrid for Grid<D> {
    fn get_width(&self) -> usize {
        self.dimensions.width()
    }

    fn get_height(&self) -> usize {
        self.dimensions.height()
    }
}

impl<D: Dimensions> StartLocatableGrid for Grid<D> {
    fn locate_start(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|c| *c == Cell::Start)
            .map(|i| self.position_of(i))
    }
}

impl<D: Dimensions> OpenQueryableGrid for Grid<D> {
    fn is_open(&self, pos: Position) -> bool {
        self.get_cell(pos).map_or(false, |c| c.is_open())
    }

    fn set_bounds_mode(&mut self, bounds: BoundsMode) {
        self.bounds = bounds;
    }

    fn open_neighbor(&self, from: Position, mv: Move) -> Option<Position> {
        let target = from.add_vec(mv.to_vector())?;
        let within = match mv {
            Move::Up | Move::Left => true,
            Move::Down => target.row < self.dimensions.height(),
            Move::Right => match self.bounds {
                BoundsMode::Corrected => target.col < self.dimensions.width(),
                BoundsMode::Legacy => target.col < self.dimensions.height(),
            },
        };
        // is_open still checks both axes, so a legacy column past the row end reads as closed
        if within && self.is_open(target) {
            Some(target)
        } else {
            None
        }
    }
}

impl<D: Dimensions> MarkableGrid for Grid<D> {
    fn mark(&mut self, pos: Position, step: u32) {
        if let Some(i) = self.index_of(pos) {
            debug_assert!(self.cells[i].is_open(), "marking a cell that isn't open");
            self.cells[i] = Cell::Visited(step);
        }
    }

    fn get_cell(&self, pos: Position) -> Option<Cell> {
        self.index_of(pos).map(|i| self.cells[i])
    }
}
