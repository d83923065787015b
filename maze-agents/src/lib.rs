#![warn(missing_debug_implementations, missing_docs)]
//! The agents that play the ladder maze.
//!
//! - [search] holds the path searches: BFS, DFS, uniform cost, A* and greedy, plus the spanning
//!   tree visit order for mazes full of diamonds.
//! - [planner] wraps those searches (and the adversarial searches of [maze_minimax]) behind one
//!   [Planner] trait.
//! - [translator] turns a planned path into the direction the character should hold.
//! - [worker] runs a planner on its own thread and publishes a command for every step, with
//!   [signal] telling a visualizer when a fresh plan is ready.
//! - [sim] plays whole matches without a screen, and [registry] knows which agents exist and
//!   which options go together.
//!
//! ```rust
//! use maze_agents::search::bfs;
//! use types::{GridCoord, MazeFixture, WalkabilityMatrix};
//!
//! let fixture = MazeFixture::from_json(include_str!("../../types/fixtures/small.json")).unwrap();
//! let walkability = WalkabilityMatrix::compute(&fixture.maze);
//!
//! let outcome = bfs(&walkability, fixture.start, &walkability.goal_locations()).unwrap();
//! assert_eq!(outcome.path.first(), Some(&fixture.start));
//! assert_eq!(outcome.target(), Some(GridCoord::new(1, 7)));
//! ```

pub mod compare;
pub mod planner;
pub mod registry;
pub mod search;
pub mod signal;
pub mod sim;
pub mod translator;
pub mod worker;

pub use planner::{BoxedPlanner, Planner, PlannerView};
pub use search::SearchOutcome;
pub use signal::{PathData, PathDataSignal};
pub use translator::{MovementCommand, MovementTranslator, TranslatorOptions, TranslatorStep};
pub use worker::{AgentHandle, AgentWorker, Character, WorkerOptions};
