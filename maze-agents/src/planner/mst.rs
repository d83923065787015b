use std::collections::VecDeque;

use types::GridCoord;

use super::{Planner, PlannerView, SearchOptions};
use crate::search::{a_star, generate_mst, SearchOutcome};

#[derive(Debug, Clone, Default)]
/// A* for filled mazes, walking the sub-goals in [generate_mst] order
///
/// The visit order is kept between calls. Sub-goals that are no longer goals (because something
/// collected them on the way) are dropped from the front, and a fresh tree is grown from the
/// current position once the order runs out while goals remain.
pub struct MstPlanner {
    options: SearchOptions,
    order: VecDeque<GridCoord>,
}

impl MstPlanner {
    #[allow(missing_docs)]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            order: VecDeque::new(),
        }
    }

    /// The sub-goals still to visit, next one first
    pub fn remaining_order(&self) -> impl Iterator<Item = &GridCoord> {
        self.order.iter()
    }
}

impl Planner for MstPlanner {
    fn name(&self) -> &'static str {
        "astar-filled"
    }

    fn plan(&mut self, position: GridCoord, view: &PlannerView) -> Option<SearchOutcome> {
        let goals = if view.goals.is_empty() {
            view.walkability.goal_locations()
        } else {
            view.goals.to_vec()
        };

        while let Some(front) = self.order.front() {
            if *front != position && goals.contains(front) {
                break;
            }
            self.order.pop_front();
        }

        if self.order.is_empty() {
            self.order = generate_mst(position, &goals)
                .into_iter()
                .map(|(_, to)| to)
                .collect();
            tracing::debug!(
                %position,
                sub_goals = self.order.len(),
                "grew a new spanning tree"
            );
        }

        let target = *self.order.front()?;
        a_star(
            view.walkability,
            position,
            &[target],
            self.options.cost_model,
            self.options.heuristic,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_view::*;

    #[test]
    fn test_walks_the_tree_in_order() {
        let loaded = filled();
        let mut goals = loaded.goals.clone();
        let mut planner = MstPlanner::default();
        let mut position = loaded.start;
        let mut reached = vec![];

        while !goals.is_empty() {
            let view = PlannerView {
                walkability: &loaded.walkability,
                goals: &goals,
                state: None,
            };
            let outcome = planner.plan(position, &view).unwrap();
            position = outcome.target().unwrap();

            reached.push(position);
            goals.retain(|g| *g != position);
        }

        assert_eq!(
            reached,
            vec![
                GridCoord::new(3, 2),
                GridCoord::new(3, 4),
                GridCoord::new(3, 5),
                GridCoord::new(1, 5),
                GridCoord::new(1, 4),
                GridCoord::new(1, 2),
                GridCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_skips_collected_sub_goals() {
        let loaded = filled();
        let mut planner = MstPlanner::default();
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &loaded.goals,
            state: None,
        };
        planner.plan(loaded.start, &view).unwrap();

        // Walking to (3, 4) picked up (3, 5) too
        let goals: Vec<_> = loaded
            .goals
            .iter()
            .copied()
            .filter(|g| *g != GridCoord::new(3, 2) && *g != GridCoord::new(3, 5))
            .collect();
        let view = PlannerView {
            goals: &goals,
            ..view
        };

        let outcome = planner.plan(GridCoord::new(3, 2), &view).unwrap();
        assert_eq!(outcome.target(), Some(GridCoord::new(3, 4)));

        let outcome = planner.plan(GridCoord::new(3, 4), &view).unwrap();
        assert_eq!(outcome.target(), Some(GridCoord::new(1, 5)));
    }

    #[test]
    fn test_regrows_when_the_order_runs_out() {
        let loaded = filled();
        let mut planner = MstPlanner::default();
        let first = [GridCoord::new(3, 2)];
        let view = PlannerView {
            walkability: &loaded.walkability,
            goals: &first,
            state: None,
        };
        planner.plan(loaded.start, &view).unwrap();
        assert_eq!(planner.remaining_order().count(), 1);

        let second = [GridCoord::new(1, 1)];
        let view = PlannerView {
            goals: &second,
            ..view
        };
        let outcome = planner.plan(GridCoord::new(3, 2), &view).unwrap();

        assert_eq!(outcome.target(), Some(GridCoord::new(1, 1)));
        assert_eq!(
            planner.remaining_order().copied().collect::<Vec<_>>(),
            vec![GridCoord::new(1, 1)]
        );
    }
}
