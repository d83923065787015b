//! Single agent path finding
//!
//! Every search walks the [WalkabilityMatrix] from a start cell to the closest of a list of target
//! cells, expanding neighbours right, down, left, up. A search that can't reach any target
//! returns `None`, callers treat that as "stay where you are".

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use types::{GridCoord, Walkability, WalkabilityMatrix};

mod bfs;
pub use bfs::bfs;

mod dfs;
pub use dfs::dfs;

mod best_first;
pub use best_first::{a_star, path_cost, ucs};

mod greedy;
pub use greedy::{greedy, nearest_goal};

mod mst;
pub use mst::generate_mst;

/// Added to the Manhattan distance for every row between two cells by
/// [Heuristic::LadderAwareManhattan]
pub const LADDER_PENALTY: i64 = 10;

/// What [Heuristic::WeightedManhattan] multiplies the Manhattan distance by
pub const HEURISTIC_WEIGHT: i64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// A found path plus the cells the search expanded on the way, in expansion order
pub struct SearchOutcome {
    /// From the start to the reached target, both included
    pub path: Vec<GridCoord>,
    /// Every cell taken off the frontier
    pub visited: Vec<GridCoord>,
}

impl SearchOutcome {
    /// Where the path ends
    pub fn target(&self) -> Option<GridCoord> {
        self.path.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How expensive it is to walk onto a cell
pub enum CostModel {
    /// Slow ground costs 3
    Simple,
    /// Slow ground costs 20
    CostSensitive,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel::CostSensitive
    }
}

impl CostModel {
    /// The cost of walking onto slow ground
    pub fn slow_cost(self) -> i64 {
        match self {
            CostModel::Simple => 3,
            CostModel::CostSensitive => 20,
        }
    }

    /// The cost of entering a cell of the given kind
    pub fn step_cost(self, cell: Walkability) -> i64 {
        match cell {
            Walkability::Slow => self.slow_cost(),
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Estimates of the remaining cost used to order the A* frontier
pub enum Heuristic {
    /// No estimate, which turns A* into uniform cost search
    Zero,
    /// Plain Manhattan distance. Admissible, so A* stays optimal
    Manhattan,
    /// Manhattan distance times [HEURISTIC_WEIGHT]. Faster, but the path may be longer
    WeightedManhattan,
    /// Manhattan distance plus [LADDER_PENALTY] for each row of height difference
    ///
    /// This overestimates on purpose to keep the agent from climbing when it doesn't need to, so
    /// it is not admissible.
    LadderAwareManhattan,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`
    pub fn estimate(self, from: GridCoord, to: GridCoord) -> i64 {
        let manhattan = from.manhattan(&to) as i64;

        match self {
            Heuristic::Zero => 0,
            Heuristic::Manhattan => manhattan,
            Heuristic::WeightedManhattan => manhattan * HEURISTIC_WEIGHT,
            Heuristic::LadderAwareManhattan => {
                manhattan + (from.row - to.row).abs() as i64 * LADDER_PENALTY
            }
        }
    }

    /// Estimate to the closest of several targets
    pub fn estimate_closest(self, from: GridCoord, targets: &[GridCoord]) -> i64 {
        targets
            .iter()
            .map(|t| self.estimate(from, *t))
            .min()
            .unwrap_or(0)
    }
}

/// Walkable neighbours of `coord`, in search order
pub(crate) fn walkable_neighbors(
    walkability: &WalkabilityMatrix,
    coord: GridCoord,
) -> impl Iterator<Item = GridCoord> + '_ {
    coord.neighbors().filter(move |n| walkability.is_walkable(*n))
}

/// Follow the parent links back from `end` and return the path from the start
pub(crate) fn reconstruct_path(
    mut paths_from: FxHashMap<GridCoord, Option<GridCoord>>,
    end: GridCoord,
) -> Vec<GridCoord> {
    let mut path = vec![];
    let mut current = Some(end);

    while let Some(c) = current {
        path.push(c);
        current = paths_from.remove(&c).flatten();
    }

    path.reverse();
    path
}

#[cfg(test)]
pub(crate) mod fixtures {
    use types::{GridCoord, MazeFixture, WalkabilityMatrix};

    pub(crate) fn load(json: &str) -> (WalkabilityMatrix, GridCoord) {
        let fixture = MazeFixture::from_json(json).unwrap();
        (WalkabilityMatrix::compute(&fixture.maze), fixture.start)
    }

    pub(crate) fn small() -> (WalkabilityMatrix, GridCoord) {
        load(include_str!("../../../types/fixtures/small.json"))
    }

    pub(crate) fn slow() -> (WalkabilityMatrix, GridCoord) {
        load(include_str!("../../../types/fixtures/slow.json"))
    }

    pub(crate) fn arena() -> (WalkabilityMatrix, GridCoord) {
        load(include_str!("../../../types/fixtures/arena.json"))
    }

    pub(crate) fn filled() -> (WalkabilityMatrix, GridCoord) {
        load(include_str!("../../../types/fixtures/filled.json"))
    }

    pub(crate) fn coords(cells: &[(i32, i32)]) -> Vec<GridCoord> {
        cells.iter().copied().map(GridCoord::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_heuristics() {
        let from = GridCoord::new(1, 1);
        let to = GridCoord::new(3, 4);

        assert_eq!(Heuristic::Zero.estimate(from, to), 0);
        assert_eq!(Heuristic::Manhattan.estimate(from, to), 5);
        assert_eq!(Heuristic::WeightedManhattan.estimate(from, to), 10);
        assert_eq!(Heuristic::LadderAwareManhattan.estimate(from, to), 25);
    }

    #[test]
    fn test_estimate_to_the_closest_target() {
        assert_eq!(
            Heuristic::Manhattan.estimate_closest(
                GridCoord::new(1, 1),
                &coords(&[(3, 3), (4, 4), (5, 5)])
            ),
            4
        );
    }

    #[test]
    fn test_step_costs() {
        assert_eq!(CostModel::Simple.step_cost(Walkability::Slow), 3);
        assert_eq!(CostModel::CostSensitive.step_cost(Walkability::Slow), 20);
        assert_eq!(CostModel::CostSensitive.step_cost(Walkability::Ladder), 1);
        assert_eq!(CostModel::Simple.step_cost(Walkability::Goal), 1);
    }

    /// On unit cost ground every optimal search agrees on the length of the path
    #[test]
    fn test_shortest_paths_agree() {
        for (w, start) in [small(), arena()] {
            let goals = w.goal_locations();

            let bfs = bfs(&w, start, &goals).unwrap();
            let ucs = ucs(&w, start, &goals, CostModel::CostSensitive).unwrap();
            let a_star = a_star(
                &w,
                start,
                &goals,
                CostModel::CostSensitive,
                Heuristic::Manhattan,
            )
            .unwrap();

            assert_eq!(bfs.path.len(), ucs.path.len());
            assert_eq!(bfs.path.len(), a_star.path.len());
        }
    }

    /// A start that is already a target gives a one cell path
    #[test]
    fn test_start_is_goal() {
        let (w, start) = small();
        let goals = vec![start];

        let expected = vec![start];
        assert_eq!(bfs(&w, start, &goals).unwrap().path, expected);
        assert_eq!(dfs(&w, start, &goals).unwrap().path, expected);
        assert_eq!(
            ucs(&w, start, &goals, CostModel::Simple).unwrap().path,
            expected
        );
        assert_eq!(
            a_star(&w, start, &goals, CostModel::Simple, Heuristic::Manhattan)
                .unwrap()
                .path,
            expected
        );
    }

    #[test]
    fn test_unreachable_goal() {
        let (w, start) = slow();
        let goals = vec![GridCoord::new(0, 0)];

        assert!(bfs(&w, start, &goals).is_none());
        assert!(dfs(&w, start, &goals).is_none());
        assert!(ucs(&w, start, &goals, CostModel::Simple).is_none());
        assert!(a_star(&w, start, &goals, CostModel::Simple, Heuristic::Manhattan).is_none());
        assert!(bfs(&w, start, &[]).is_none());
    }

    #[test]
    fn test_reconstruct_path() {
        let mut paths_from = FxHashMap::default();
        paths_from.insert(GridCoord::new(0, 0), None);
        paths_from.insert(GridCoord::new(0, 1), Some(GridCoord::new(0, 0)));
        paths_from.insert(GridCoord::new(1, 1), Some(GridCoord::new(0, 1)));

        assert_eq!(
            reconstruct_path(paths_from, GridCoord::new(1, 1)),
            coords(&[(0, 0), (0, 1), (1, 1)])
        );
    }
}
