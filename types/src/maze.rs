use std::convert::TryFrom;

use anyhow::{bail, ensure, Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::GridCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// A raw cell of the level layout
pub enum MazeCell {
    /// Open air. Becomes standable ground when it has a block above and below it
    Empty,
    /// A solid block
    Platform,
    /// A diamond waiting to be collected
    Goal,
    /// A climbable ladder section
    Ladder,
    /// A solid block whose top surface is slow to walk over
    SlowPlatform,
}

impl MazeCell {
    /// Platforms of either kind
    pub fn is_solid(self) -> bool {
        matches!(self, MazeCell::Platform | MazeCell::SlowPlatform)
    }
}

impl TryFrom<u8> for MazeCell {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => MazeCell::Empty,
            1 => MazeCell::Platform,
            2 => MazeCell::Goal,
            3 => MazeCell::Ladder,
            4 => MazeCell::SlowPlatform,
            other => bail!("unknown maze cell value {}", other),
        })
    }
}

impl From<MazeCell> for u8 {
    fn from(cell: MazeCell) -> Self {
        match cell {
            MazeCell::Empty => 0,
            MazeCell::Platform => 1,
            MazeCell::Goal => 2,
            MazeCell::Ladder => 3,
            MazeCell::SlowPlatform => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
/// The level layout, a non-empty rectangular grid of [MazeCell]s
///
/// The world owns this. The agents only ever read it, except that a collected diamond in a filled
/// maze is turned back into [MazeCell::Empty] by whoever runs the match.
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<MazeCell>,
}

impl Maze {
    /// Build a maze from rows of raw cell values
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        ensure!(!rows.is_empty(), "a maze needs at least one row");
        let cols = rows[0].len();
        ensure!(cols > 0, "a maze needs at least one column");

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == cols,
                "row {} has {} cells but the maze is {} wide",
                r,
                row.len(),
                cols
            );
            for (c, value) in row.iter().enumerate() {
                let cell = MazeCell::try_from(*value)
                    .with_context(|| format!("bad cell at ({}, {})", r, c))?;
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[allow(missing_docs)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[allow(missing_docs)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        let row = usize::try_from(coord.row).ok()?;
        let col = usize::try_from(coord.col).ok()?;

        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Whether the coordinate lies on the grid
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.index(coord).is_some()
    }

    /// The cell at `coord`, or `None` off the grid
    pub fn get(&self, coord: GridCoord) -> Option<MazeCell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Overwrite a single cell
    pub fn set(&mut self, coord: GridCoord, cell: MazeCell) -> Result<()> {
        let i = self
            .index(coord)
            .with_context(|| format!("{} is outside the maze", coord))?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let cols = self.cols as i32;
        (0..self.rows as i32).cartesian_product(0..cols).map(GridCoord::from)
    }

    /// Every diamond, in row-major order
    pub fn goal_cells(&self) -> Vec<GridCoord> {
        self.coords()
            .filter(|c| self.get(*c) == Some(MazeCell::Goal))
            .collect()
    }

    /// Moves the (single) diamond of a regular maze to `to`
    ///
    /// Any other diamond is cleared. Callers must recompute walkability afterwards because the
    /// cells around both the old and the new goal can change standability.
    pub fn relocate_goal(&mut self, to: GridCoord) -> Result<()> {
        ensure!(
            self.get(to) == Some(MazeCell::Empty),
            "a goal can only be moved onto an empty cell, {} is {:?}",
            to,
            self.get(to)
        );

        for goal in self.goal_cells() {
            self.set(goal, MazeCell::Empty)?;
        }
        self.set(to, MazeCell::Goal)
    }

    /// Marks a collected diamond of a filled maze as empty
    pub fn clear_goal(&mut self, at: GridCoord) -> Result<()> {
        ensure!(
            self.get(at) == Some(MazeCell::Goal),
            "there is no goal to clear at {}",
            at
        );
        self.set(at, MazeCell::Empty)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Maze {
    type Error = anyhow::Error;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Maze::from_rows(rows)
    }
}

impl From<Maze> for Vec<Vec<u8>> {
    fn from(maze: Maze) -> Self {
        maze.cells
            .chunks(maze.cols)
            .map(|row| row.iter().map(|c| u8::from(*c)).collect())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The stock maze widths
pub enum MazeSize {
    #[allow(missing_docs)]
    Small,
    #[allow(missing_docs)]
    Medium,
    #[allow(missing_docs)]
    Large,
}

impl MazeSize {
    /// Classify a maze by its width
    pub fn of(maze: &Maze) -> Self {
        match maze.cols() {
            0..=17 => MazeSize::Small,
            18..=20 => MazeSize::Medium,
            _ => MazeSize::Large,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A maze together with where everybody starts, as stored in the JSON fixtures
///
/// ```rust
/// use types::{GridCoord, MazeFixture};
///
/// let fixture = MazeFixture::from_json(
///     r#"{ "cells": [[1, 1, 1], [1, 0, 1], [1, 1, 1]], "start": [1, 1] }"#,
/// )
/// .unwrap();
///
/// assert_eq!(fixture.start, GridCoord::new(1, 1));
/// assert!(fixture.enemies.is_empty());
/// ```
pub struct MazeFixture {
    /// The level layout
    #[serde(rename = "cells")]
    pub maze: Maze,
    /// Where the main agent starts
    pub start: GridCoord,
    /// Where the enemies start, if any
    #[serde(default)]
    pub enemies: Vec<GridCoord>,
}

impl MazeFixture {
    /// Parse and validate a fixture
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: MazeFixture =
            serde_json::from_str(json).context("could not parse maze fixture")?;

        ensure!(
            fixture.maze.contains(fixture.start),
            "start {} is outside the maze",
            fixture.start
        );
        if let Some(e) = fixture.enemies.iter().find(|e| !fixture.maze.contains(**e)) {
            bail!("enemy start {} is outside the maze", e);
        }

        Ok(fixture)
    }

    /// Whether every open cell of the maze holds a diamond
    ///
    /// The start cell is the one open cell allowed to stay empty.
    pub fn is_filled(&self) -> bool {
        let goals = self.maze.goal_cells();
        !goals.is_empty()
            && self
                .maze
                .coords()
                .filter(|c| *c != self.start)
                .all(|c| self.maze.get(c) != Some(MazeCell::Empty) || !self.standable(c))
    }

    fn standable(&self, c: GridCoord) -> bool {
        let solid = |c: GridCoord| self.maze.get(c).map_or(false, MazeCell::is_solid);
        solid(c.offset((-1, 0))) && solid(c.offset((1, 0)))
    }
}
