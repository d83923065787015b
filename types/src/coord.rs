use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The order neighbours are expanded in by every search: right, down, left, up
///
/// Changing this changes which of several equally short paths a search returns, so the path
/// fixtures in the agent tests depend on it.
pub const SEARCH_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
/// A cell in the maze, addressed as `(row, col)`. Rows grow downwards.
///
/// The components are signed so that stepping off the edge of the grid is representable. Such a
/// coordinate simply reads as a wall.
pub struct GridCoord {
    /// Row index, 0 is the top of the maze
    pub row: i32,
    /// Column index, 0 is the left of the maze
    pub col: i32,
}

impl GridCoord {
    /// Construct a coordinate from its row and column
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset this coordinate by a `(row, col)` delta
    pub fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// The cell reached by taking `m` from here
    pub fn step(self, m: Move) -> Self {
        self.offset(m.to_vector())
    }

    /// The four orthogonal neighbours, in [SEARCH_DIRECTIONS] order
    pub fn neighbors(self) -> impl Iterator<Item = GridCoord> {
        SEARCH_DIRECTIONS.into_iter().map(move |d| self.offset(d))
    }

    /// Taxicab distance between two cells
    pub fn manhattan(&self, other: &GridCoord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The move that gets from `self` to an orthogonally adjacent `other`
    pub fn direction_to(&self, other: &GridCoord) -> Option<Move> {
        Move::all()
            .into_iter()
            .find(|m| self.step(*m) == *other)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<GridCoord> for (i32, i32) {
    fn from(c: GridCoord) -> Self {
        (c.row, c.col)
    }
}

impl Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// One grid step an agent can take in the adversarial game
pub enum Move {
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Up,
}

impl Move {
    /// All the moves, in the order legal moves are reported in
    pub const fn all() -> [Move; 4] {
        [Move::Left, Move::Right, Move::Down, Move::Up]
    }

    /// `(row, col)` delta of this move
    pub const fn to_vector(self) -> (i32, i32) {
        match self {
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
            Move::Up => (-1, 0),
        }
    }

    /// The move that undoes this one
    pub const fn reverse(self) -> Move {
        match self {
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::Down => Move::Up,
            Move::Up => Move::Down,
        }
    }

    /// Left or right
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Move::Left | Move::Right)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
            Move::Down => "DOWN",
            Move::Up => "UP",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_follow_search_order() {
        let neighbors: Vec<_> = GridCoord::new(3, 3).neighbors().collect();

        assert_eq!(
            neighbors,
            vec![
                GridCoord::new(3, 4),
                GridCoord::new(4, 3),
                GridCoord::new(3, 2),
                GridCoord::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_direction_to() {
        let from = GridCoord::new(5, 5);

        assert_eq!(from.direction_to(&GridCoord::new(4, 5)), Some(Move::Up));
        assert_eq!(from.direction_to(&GridCoord::new(5, 4)), Some(Move::Left));
        assert_eq!(from.direction_to(&GridCoord::new(4, 4)), None);
        assert_eq!(from.direction_to(&from), None);
    }

    #[test]
    fn test_coord_serializes_as_pair() {
        let c: GridCoord = serde_json::from_str("[2, 7]").unwrap();
        assert_eq!(c, GridCoord::new(2, 7));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[2,7]");
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(GridCoord::new(1, 1).manhattan(&GridCoord::new(4, -1)), 5);
    }
}
