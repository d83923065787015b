use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use types::GridCoord;

use super::{Planner, PlannerView};
use crate::search::{a_star, bfs, dfs, greedy, ucs, CostModel, Heuristic, SearchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// The uninformed and informed path searches a [SearchPlanner] can run
pub enum SearchAlgorithm {
    #[allow(missing_docs)]
    Bfs,
    #[allow(missing_docs)]
    Dfs,
    #[allow(missing_docs)]
    Ucs,
    #[allow(missing_docs)]
    AStar,
}

impl SearchAlgorithm {
    #[allow(missing_docs)]
    pub fn name(&self) -> &'static str {
        match self {
            SearchAlgorithm::Bfs => "bfs",
            SearchAlgorithm::Dfs => "dfs",
            SearchAlgorithm::Ucs => "ucs",
            SearchAlgorithm::AStar => "astar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Tuning for the cost aware searches
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use maze_agents::{planner::SearchOptions, search::{CostModel, Heuristic}};
///
/// let defaults = SearchOptions::default();
///
/// assert_eq!(defaults.cost_model, CostModel::CostSensitive);
/// assert_eq!(defaults.heuristic, Heuristic::Manhattan);
/// ```
pub struct SearchOptions {
    /// Used by UCS and A*
    pub cost_model: CostModel,
    /// Only used by A*
    pub heuristic: Heuristic,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            cost_model: CostModel::default(),
            heuristic: Heuristic::Manhattan,
        }
    }
}

/// The goals to search for: the ones handed to the planner, or every goal cell of the maze when
/// there are none
fn targets<'a>(view: &'a PlannerView) -> Cow<'a, [GridCoord]> {
    if view.goals.is_empty() {
        Cow::Owned(view.walkability.goal_locations())
    } else {
        Cow::Borrowed(view.goals)
    }
}

#[derive(Debug, Clone, Copy)]
/// Plans a full path to the closest goal with one of the [SearchAlgorithm]s
pub struct SearchPlanner {
    algorithm: SearchAlgorithm,
    options: SearchOptions,
}

impl SearchPlanner {
    #[allow(missing_docs)]
    pub fn new(algorithm: SearchAlgorithm, options: SearchOptions) -> Self {
        Self { algorithm, options }
    }
}

impl Planner for SearchPlanner {
    fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome> {
        let goals = targets(view);
        let w = view.walkability;
        let SearchOptions {
            cost_model,
            heuristic,
        } = self.options;

        match self.algorithm {
            SearchAlgorithm::Bfs => bfs(w, position, &goals),
            SearchAlgorithm::Dfs => dfs(w, position, &goals),
            SearchAlgorithm::Ucs => ucs(w, position, &goals, cost_model),
            SearchAlgorithm::AStar => a_star(w, position, &goals, cost_model, heuristic),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Walks to whichever goal is closest as the crow flies, see [greedy]
pub struct GreedyPlanner;

impl Planner for GreedyPlanner {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome> {
        greedy(view.walkability, position, &targets(view))
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// An enemy that runs straight at the main agent along the shortest path
pub struct ChaserPlanner;

impl Planner for ChaserPlanner {
    fn name(&self) -> &'static str {
        "chaser"
    }

    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome> {
        let prey = view.state?.main;
        bfs(view.walkability, position, &[prey])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_view::*;
    use crate::search::path_cost;

    #[test]
    fn test_every_algorithm_reaches_the_goal() {
        let loaded = small();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };

        for algorithm in [
            SearchAlgorithm::Bfs,
            SearchAlgorithm::Dfs,
            SearchAlgorithm::Ucs,
            SearchAlgorithm::AStar,
        ] {
            let mut planner = SearchPlanner::new(algorithm, SearchOptions::default());
            let outcome = planner.plan(loaded.start, &view).unwrap();

            assert_eq!(outcome.path.first(), Some(&loaded.start), "{}", planner.name());
            assert_eq!(outcome.target(), Some(GridCoord::new(1, 7)), "{}", planner.name());
        }
    }

    #[test]
    fn test_falls_back_to_the_goal_cells() {
        let loaded = small();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &[],
            state: None,
        };

        let outcome = SearchPlanner::new(SearchAlgorithm::Bfs, SearchOptions::default())
            .plan(loaded.start, &view)
            .unwrap();
        assert_eq!(outcome.target(), Some(GridCoord::new(1, 7)));
    }

    #[test]
    fn test_cost_model_is_passed_through() {
        let loaded = slow();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };

        let outcome = SearchPlanner::new(
            SearchAlgorithm::Ucs,
            SearchOptions {
                cost_model: CostModel::CostSensitive,
                ..Default::default()
            },
        )
        .plan(loaded.start, &view)
        .unwrap();
        assert_eq!(
            path_cost(&loaded.walkability, &outcome.path, CostModel::CostSensitive),
            10
        );
    }

    #[test]
    fn test_greedy_planner() {
        let loaded = filled();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };

        let outcome = GreedyPlanner.plan(loaded.start, &view).unwrap();
        assert_eq!(outcome.path, vec![GridCoord::new(3, 1), GridCoord::new(3, 2)]);
    }

    #[test]
    fn test_chaser_needs_a_state() {
        let loaded = arena();
        let enemy = loaded.state.enemies[0];

        let without_state = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };
        assert!(ChaserPlanner.plan(enemy, &without_state).is_none());

        let view = PlannerView {
            state: Some(&loaded.state),
            ..without_state
        };
        let outcome = ChaserPlanner.plan(enemy, &view).unwrap();
        assert_eq!(outcome.path.first(), Some(&enemy));
        assert_eq!(outcome.target(), Some(loaded.start));
    }
}
