#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements the adversarial searches used by the maze agents: minimax, minimax with
//! alpha-beta pruning and expectimax.
//!
//! The searches are written against the [GameModel] trait, which describes a turn based game with
//! any number of agents where agent `0` is the one we are choosing a move for. [MazeGame] is the
//! implementation for the ladder maze: it knows the legal moves of an agent, how to simulate one
//! of them and how good a position is for the main agent.
//!
//! ```rust
//! use std::sync::Arc;
//! use maze_minimax::{
//!     AdversarialStrategy, AlphaBeta, EvaluationWeights, GameState, MazeGame, StrategyOptions,
//! };
//! use types::{GridCoord, MazeFixture, WalkabilityMatrix};
//!
//! let fixture = MazeFixture::from_json(include_str!("../../types/fixtures/arena.json")).unwrap();
//! let walkability = Arc::new(WalkabilityMatrix::compute(&fixture.maze));
//!
//! let state = GameState::new(
//!     fixture.start,
//!     fixture.enemies.iter().copied(),
//!     walkability.goal_locations(),
//! );
//! let game = MazeGame::new(walkability, EvaluationWeights::default(), &state);
//!
//! let decision = AlphaBeta::new(StrategyOptions::default()).choose_action(&game, &state, 2, 0);
//! assert!(decision.action.is_some());
//! ```

mod game;
pub use game::{next_turn, GameModel};

mod maze_game;
pub use maze_game::{shortest_distance, EvaluationWeights, GameState, MazeGame, PositionKey};

mod strategy;
pub use strategy::{
    chance_probabilities, AdversarialStrategy, AlphaBeta, Decision, Expectimax, MinMaxReturn,
    Minimax, NodeKind, SearchStats, StrategyKind, StrategyOptions,
};
