//! The ladder maze as a [GameModel](crate::GameModel)
//!
//! [GameState] is the value that gets passed around between agents every tick, and [MazeGame]
//! bundles the walkability of the level with the evaluation weights so the strategies can ask it
//! about legal moves, successors and scores.

mod state;
pub use state::{GameState, PositionKey};

mod evaluation;
pub use evaluation::{shortest_distance, EvaluationWeights};

mod rules;
pub use rules::MazeGame;
