//! Grid and coordinate primitives shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid side length of the reference deployment.
pub const GRID_SIZE: usize = 15;

/// Wire value for a traversable cell.
pub const CELL_FREE: u8 = 0;
/// Wire value for an occupied cell.
pub const CELL_OBSTACLE: u8 = 1;

/// A grid coordinate. `x` indexes the row, `y` the column, matching the
/// oracle's `{x, y}` wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Raised when an oracle snapshot is not a usable occupancy matrix.
#[derive(Debug)]
pub struct InvalidGrid(String);

impl fmt::Display for InvalidGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Square occupancy matrix. Dimensions are fixed at construction; cells are
/// only ever replaced wholesale by oracle snapshots, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<u8>>,
}

impl Grid {
    /// Build a grid from a raw wire matrix. Rejects empty and ragged input.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, InvalidGrid> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidGrid("grid snapshot is empty".to_string()));
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(InvalidGrid(format!(
                    "grid snapshot is not square: row {index} has {} cells, expected {size}",
                    row.len()
                )));
            }
        }
        Ok(Self { rows })
    }

    /// An all-free grid of the given side length.
    pub fn empty(size: usize) -> Self {
        Self {
            rows: vec![vec![CELL_FREE; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Fixed launch cell of every route.
    pub fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    /// Fixed destination cell in the opposite corner.
    pub fn destination(&self) -> Coord {
        let last = self.size().saturating_sub(1);
        Coord::new(last, last)
    }

    pub fn in_bounds(&self, cell: Coord) -> bool {
        cell.x < self.size() && cell.y < self.size()
    }

    pub fn is_obstacle(&self, cell: Coord) -> bool {
        self.in_bounds(cell) && self.rows[cell.x][cell.y] == CELL_OBSTACLE
    }

    /// Row-major cell values, for rendering.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}
