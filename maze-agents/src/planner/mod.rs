//! Planners decide where an agent should go next
//!
//! The worker owns one [Planner] and asks it for a new [SearchOutcome] whenever the previous path
//! is used up or stopped making sense. Single agent planners return a whole path to a goal, the
//! adversarial planner only ever returns the next cell.

use std::{fmt::Debug, sync::Arc};

use maze_minimax::GameState;
use types::{GridCoord, WalkabilityMatrix};

use crate::search::SearchOutcome;

mod single;
pub use single::{ChaserPlanner, GreedyPlanner, SearchAlgorithm, SearchOptions, SearchPlanner};

mod mst;
pub use mst::MstPlanner;

mod random;
pub use random::RandomWalker;

mod adversarial;
pub use adversarial::{AdversarialOptions, AdversarialPlanner};

/// Everything a planner gets to look at for one planning cycle
#[derive(Debug, Clone, Copy)]
pub struct PlannerView<'a> {
    #[allow(missing_docs)]
    pub walkability: &'a Arc<WalkabilityMatrix>,
    /// Goals that are still to be collected
    pub goals: &'a [GridCoord],
    /// The latest shared match state, only present in matches with enemies
    pub state: Option<&'a GameState>,
}

/// Something that can turn the current position into a path
pub trait Planner: Debug {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Plan from `position`. `None` means there is nowhere to go and the agent should hold still
    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome>;
}

/// A planner that can be moved onto a worker thread
pub type BoxedPlanner = Box<dyn Planner + Send>;

impl<P: Planner + ?Sized> Planner for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome> {
        (**self).plan(position, view)
    }
}

#[cfg(test)]
pub(crate) mod test_view {
    use std::sync::Arc;

    use maze_minimax::GameState;
    use types::{GridCoord, MazeFixture, WalkabilityMatrix};

    /// Walkability, start, goals and the starting state of a fixture
    pub(crate) struct Loaded {
        pub(crate) walkability: Arc<WalkabilityMatrix>,
        pub(crate) start: GridCoord,
        pub(crate) goals: Vec<GridCoord>,
        pub(crate) state: GameState,
    }

    pub(crate) fn load(json: &str) -> Loaded {
        let fixture = MazeFixture::from_json(json).unwrap();
        let walkability = Arc::new(WalkabilityMatrix::compute(&fixture.maze));
        let goals = walkability.goal_locations();
        let state = GameState::new(fixture.start, fixture.enemies.iter().copied(), goals.clone());

        Loaded {
            walkability,
            start: fixture.start,
            goals,
            state,
        }
    }

    pub(crate) fn small() -> Loaded {
        load(include_str!("../../../types/fixtures/small.json"))
    }

    pub(crate) fn slow() -> Loaded {
        load(include_str!("../../../types/fixtures/slow.json"))
    }

    pub(crate) fn arena() -> Loaded {
        load(include_str!("../../../types/fixtures/arena.json"))
    }

    pub(crate) fn filled() -> Loaded {
        load(include_str!("../../../types/fixtures/filled.json"))
    }
}
