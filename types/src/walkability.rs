use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{GridCoord, Maze, MazeCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
/// What an agent can do with a cell
pub enum Walkability {
    /// Not enterable. Also what every off-grid read returns
    Blocked = 0,
    /// Standable ground
    Free = 1,
    /// A diamond, always enterable
    Goal = 2,
    /// A ladder, always enterable and the only way to change rows
    Ladder = 3,
    /// Standable ground over a slow platform
    Slow = 4,
}

impl Walkability {
    /// Anything but [Walkability::Blocked]
    pub fn is_walkable(self) -> bool {
        self != Walkability::Blocked
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The walkability of every cell of a [Maze], computed in one pass
pub struct WalkabilityMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<Walkability>,
}

impl WalkabilityMatrix {
    /// Derive walkability from the raw layout
    ///
    /// Diamonds and ladders are always walkable. An empty cell away from the border is standable
    /// ground when there is a platform directly above and directly below it, and it is slow when
    /// the one below is a slow platform. Everything else is blocked.
    ///
    /// This has to be rerun from scratch whenever a diamond moves, since that can change whether
    /// the neighbouring cells are standable.
    pub fn compute(maze: &Maze) -> Self {
        let rows = maze.rows();
        let cols = maze.cols();

        let cells = maze
            .coords()
            .map(|coord| {
                let interior = coord.row > 0
                    && coord.col > 0
                    && (coord.row as usize) < rows - 1
                    && (coord.col as usize) < cols - 1;

                match maze.get(coord) {
                    Some(MazeCell::Goal) => Walkability::Goal,
                    Some(MazeCell::Ladder) => Walkability::Ladder,
                    Some(MazeCell::Empty) if interior => {
                        let above = maze.get(coord.offset((-1, 0)));
                        let below = maze.get(coord.offset((1, 0)));

                        match (above, below) {
                            (Some(a), Some(MazeCell::Platform)) if a.is_solid() => {
                                Walkability::Free
                            }
                            (Some(a), Some(MazeCell::SlowPlatform)) if a.is_solid() => {
                                Walkability::Slow
                            }
                            _ => Walkability::Blocked,
                        }
                    }
                    _ => Walkability::Blocked,
                }
            })
            .collect();

        Self { rows, cols, cells }
    }

    #[allow(missing_docs)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[allow(missing_docs)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Walkability at `coord`. Off-grid coordinates are [Walkability::Blocked]
    pub fn get(&self, coord: GridCoord) -> Walkability {
        if coord.row < 0 || coord.col < 0 {
            return Walkability::Blocked;
        }
        let (row, col) = (coord.row as usize, coord.col as usize);
        if row >= self.rows || col >= self.cols {
            return Walkability::Blocked;
        }

        self.cells[row * self.cols + col]
    }

    /// Shorthand for `get(coord).is_walkable()`
    pub fn is_walkable(&self, coord: GridCoord) -> bool {
        self.get(coord).is_walkable()
    }

    /// Shorthand for `get(coord) == Walkability::Ladder`
    pub fn is_ladder(&self, coord: GridCoord) -> bool {
        self.get(coord) == Walkability::Ladder
    }

    fn coords_where(&self, value: Walkability) -> Vec<GridCoord> {
        (0..self.rows as i32)
            .cartesian_product(0..self.cols as i32)
            .map(GridCoord::from)
            .filter(|c| self.get(*c) == value)
            .collect()
    }

    /// Every diamond, row-major
    pub fn goal_locations(&self) -> Vec<GridCoord> {
        self.coords_where(Walkability::Goal)
    }

    /// Every plain standable cell, row-major
    ///
    /// These are the candidate spots for a relocated diamond.
    pub fn walkable_locations(&self) -> Vec<GridCoord> {
        self.coords_where(Walkability::Free)
    }
}

impl Display for WalkabilityMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.cols) {
            writeln!(f, "{}", row.iter().map(|w| *w as u8).join(" "))?;
        }
        Ok(())
    }
}
