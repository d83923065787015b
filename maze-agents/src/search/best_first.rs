use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use types::{GridCoord, WalkabilityMatrix};

use super::{reconstruct_path, walkable_neighbors, CostModel, Heuristic, SearchOutcome};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Node {
    /// Accumulated cost plus the heuristic estimate
    priority: i64,
    /// Accumulated cost when this entry was pushed
    cost: i64,
    /// Insertion order, so equal priorities come out first in first out
    sequence: u64,
    coordinate: GridCoord,
}

// Reversed so the std max-heap pops the lowest priority, and the oldest entry among equals
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform cost search, the cheapest path under `cost_model`
pub fn ucs(
    walkability: &WalkabilityMatrix,
    start: GridCoord,
    goals: &[GridCoord],
    cost_model: CostModel,
) -> Option<SearchOutcome> {
    a_star(walkability, start, goals, cost_model, Heuristic::Zero)
}

/// A* search ordered by `f = g + h`
///
/// `g` is the cost of entering every cell on the path so far under `cost_model`, and `h` is the
/// `heuristic` estimate to the closest goal. A neighbour is (re)queued whenever the new route to
/// it is strictly cheaper than the best one recorded so far, and queue entries that have been
/// beaten since they were pushed are skipped when they come off the queue.
///
/// With [Heuristic::Zero] or [Heuristic::Manhattan] the returned path is a cheapest one. The
/// weighted and ladder-aware heuristics trade that guarantee for expanding fewer cells.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        start = %start,
        targets = goals.len(),
        cost_model = ?cost_model,
        heuristic = ?heuristic,
        visited,
        cost
    )
)]
pub fn a_star(
    walkability: &WalkabilityMatrix,
    start: GridCoord,
    goals: &[GridCoord],
    cost_model: CostModel,
    heuristic: Heuristic,
) -> Option<SearchOutcome> {
    if goals.is_empty() {
        return None;
    }

    let mut to_search: BinaryHeap<Node> = BinaryHeap::new();
    let mut known_cost: FxHashMap<GridCoord, i64> = FxHashMap::default();
    let mut paths_from: FxHashMap<GridCoord, Option<GridCoord>> = FxHashMap::default();
    let mut visited = vec![];
    let mut sequence = 0;

    to_search.push(Node {
        priority: heuristic.estimate_closest(start, goals),
        cost: 0,
        sequence,
        coordinate: start,
    });
    known_cost.insert(start, 0);
    paths_from.insert(start, None);

    while let Some(Node {
        cost, coordinate, ..
    }) = to_search.pop()
    {
        if cost > *known_cost.get(&coordinate).unwrap_or(&i64::MAX) {
            continue;
        }
        visited.push(coordinate);

        if goals.contains(&coordinate) {
            let current_span = tracing::Span::current();
            current_span.record("visited", visited.len());
            current_span.record("cost", cost);

            return Some(SearchOutcome {
                path: reconstruct_path(paths_from, coordinate),
                visited,
            });
        }

        for neighbor in walkable_neighbors(walkability, coordinate) {
            let tentative = cost + cost_model.step_cost(walkability.get(neighbor));

            if tentative < *known_cost.get(&neighbor).unwrap_or(&i64::MAX) {
                known_cost.insert(neighbor, tentative);
                paths_from.insert(neighbor, Some(coordinate));

                sequence += 1;
                to_search.push(Node {
                    priority: tentative + heuristic.estimate_closest(neighbor, goals),
                    cost: tentative,
                    sequence,
                    coordinate: neighbor,
                });
            }
        }
    }

    tracing::Span::current().record("visited", visited.len());
    None
}

/// Total cost of walking `path` under `cost_model`, not counting the first cell
pub fn path_cost(
    walkability: &WalkabilityMatrix,
    path: &[GridCoord],
    cost_model: CostModel,
) -> i64 {
    path.iter()
        .skip(1)
        .map(|c| cost_model.step_cost(walkability.get(*c)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{bfs, fixtures::*};

    #[test]
    fn test_equal_priorities_pop_first_in_first_out() {
        let mut heap = BinaryHeap::new();
        for (sequence, col) in [(0, 5), (1, 2), (2, 9)] {
            heap.push(Node {
                priority: 4,
                cost: 4,
                sequence,
                coordinate: GridCoord::new(0, col),
            });
        }
        heap.push(Node {
            priority: 3,
            cost: 3,
            sequence: 3,
            coordinate: GridCoord::new(1, 1),
        });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|n| n.coordinate.col)).collect();
        assert_eq!(order, vec![1, 5, 2, 9]);
    }

    #[test]
    fn test_ucs_walks_around_slow_ground() {
        let (w, start) = slow();
        let goals = w.goal_locations();

        let cheap = ucs(&w, start, &goals, CostModel::CostSensitive).unwrap();
        let short = bfs(&w, start, &goals).unwrap();

        assert_eq!(
            cheap.path,
            coords(&[
                (3, 1),
                (3, 2),
                (2, 2),
                (1, 2),
                (1, 3),
                (1, 4),
                (1, 5),
                (1, 6),
                (2, 6),
                (3, 6),
                (3, 7)
            ])
        );
        assert_eq!(path_cost(&w, &cheap.path, CostModel::CostSensitive), 10);
        assert_eq!(path_cost(&w, &short.path, CostModel::CostSensitive), 63);
        assert!(cheap.path.len() > short.path.len());
    }

    #[test]
    fn test_a_star_expands_fewer_cells_than_ucs() {
        let (w, start) = arena();
        let goals = w.goal_locations();

        let uninformed = ucs(&w, start, &goals, CostModel::Simple).unwrap();
        let informed = a_star(&w, start, &goals, CostModel::Simple, Heuristic::Manhattan).unwrap();

        assert_eq!(uninformed.path.len(), informed.path.len());
        assert!(informed.visited.len() <= uninformed.visited.len());
    }

    #[test]
    fn test_inadmissible_heuristics_still_reach_the_goal() {
        let (w, start) = slow();
        let goals = w.goal_locations();

        for heuristic in [Heuristic::WeightedManhattan, Heuristic::LadderAwareManhattan] {
            let outcome = a_star(&w, start, &goals, CostModel::CostSensitive, heuristic).unwrap();
            assert_eq!(outcome.path.first(), Some(&start));
            assert_eq!(outcome.target(), Some(GridCoord::new(3, 7)));
        }
    }
}
