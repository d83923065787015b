#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Grid types shared by every maze agent.
//!
//! A [Maze] is the raw level layout as the world hands it to us. Nothing in the search code reads
//! it directly: it is first turned into a [WalkabilityMatrix], which says for every cell whether
//! an agent may stand there and what kind of terrain it is.
//!
//! ```rust
//! use types::{GridCoord, Maze, Walkability, WalkabilityMatrix};
//!
//! let maze = Maze::from_rows(vec![
//!     vec![1, 1, 1, 1],
//!     vec![1, 0, 2, 1],
//!     vec![1, 1, 1, 1],
//! ])
//! .unwrap();
//!
//! let walkability = WalkabilityMatrix::compute(&maze);
//! assert_eq!(walkability.get(GridCoord::new(1, 1)), Walkability::Free);
//! assert_eq!(walkability.get(GridCoord::new(1, 2)), Walkability::Goal);
//! // Anything off the grid is a wall
//! assert_eq!(walkability.get(GridCoord::new(-1, 7)), Walkability::Blocked);
//! ```

mod coord;
pub use coord::{GridCoord, Move, SEARCH_DIRECTIONS};

mod maze;
pub use maze::{Maze, MazeCell, MazeFixture, MazeSize};

mod walkability;
pub use walkability::{Walkability, WalkabilityMatrix};
