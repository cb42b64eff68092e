#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Types for exploring grid mazes with a step-marking depth first walk.
//! A maze is a rectangle of walls, open cells and a single start cell. Walking it marks every
//! open cell reachable from the start with the step count it was reached at, trying the
//! neighbours of each cell in the fixed order up, right, down, left.
//!
//! ```
//! use maze_walk_types::walk::{explore, NoopObserver, WalkConfig};
//! use maze_walk_types::wire_representation::MazeSpec;
//!
//! let mut grid = MazeSpec::canonical().to_grid().unwrap();
//! explore(&mut grid, &WalkConfig::default(), &mut NoopObserver).unwrap();
//! assert_eq!(
//!     grid.render(),
//!     "#######\n#s1234#\n#1#####\n#234#0#\n#3###9#\n#45678#\n#######"
//! );
//! ```

use wire_representation::MazeSpec;

pub mod error;
pub mod grid;
pub mod types;
pub mod walk;
pub mod wire_representation;

/// Loads a maze fixture from a given json string
pub fn maze_fixture(maze_fixture: &str) -> MazeSpec {
    let m: Result<MazeSpec, _> = serde_json::from_str(maze_fixture);
    m.expect("the json literal is valid")
}
