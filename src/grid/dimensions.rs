//! How a grid stores its width and height.
//!
//! [Custom] keeps whatever size the maze spec turned out to be. [Fixed] pins the size at compile
//! time, so a spec of any other size is refused when the grid is built.

use core::fmt::Debug;
use std::hash::Hash;

/// Trait that all different Dimensions must implement
pub trait Dimensions: Debug + Copy + Hash {
    /// Convert from a measured width and height, None if this representation can't hold them
    fn from_dimensions(width: usize, height: usize) -> Option<Self>;

    /// Get the width of this dimension
    fn width(&self) -> usize;

    /// Get the height of this dimension
    fn height(&self) -> usize;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A grid whose size is known at compile time
pub struct Fixed<const W: usize, const H: usize>;

impl<const W: usize, const H: usize> Dimensions for Fixed<W, H> {
    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn from_dimensions(width: usize, height: usize) -> Option<Self> {
        if width == W && height == H {
            Some(Self)
        } else {
            None
        }
    }
}

/// Alias for a [Fixed] grid at the height and width of the canonical 7x7 maze
pub type CanonicalMaze = Fixed<7, 7>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// Any size, stored at runtime
pub struct Custom {
    width: usize,
    height: usize,
}

impl Dimensions for Custom {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn from_dimensions(width: usize, height: usize) -> Option<Self> {
        Some(Self { width, height })
    }
}
