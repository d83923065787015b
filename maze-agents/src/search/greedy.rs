use types::{GridCoord, WalkabilityMatrix};

use super::{bfs, SearchOutcome};

/// The goal closest to `position` as the crow flies (Manhattan distance)
///
/// Ties go to the goal listed first.
pub fn nearest_goal(position: GridCoord, goals: &[GridCoord]) -> Option<GridCoord> {
    goals.iter().copied().min_by_key(|g| position.manhattan(g))
}

/// Greedy best first: commit to the nearest goal, then walk there with [bfs]
///
/// The choice ignores walls, so the committed goal can be far away on foot. This is re-run from
/// scratch every time a goal is collected.
pub fn greedy(
    walkability: &WalkabilityMatrix,
    start: GridCoord,
    goals: &[GridCoord],
) -> Option<SearchOutcome> {
    let target = nearest_goal(start, goals)?;
    tracing::debug!(%start, %target, "greedy picked a goal");

    bfs(walkability, start, &[target])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fixtures::*;

    #[test]
    fn test_nearest_goal_prefers_the_first_on_ties() {
        let goals = coords(&[(1, 4), (1, 2), (5, 5)]);

        assert_eq!(
            nearest_goal(GridCoord::new(1, 3), &goals),
            Some(GridCoord::new(1, 4))
        );
        assert_eq!(nearest_goal(GridCoord::new(1, 3), &[]), None);
    }

    #[test]
    fn test_greedy_in_a_filled_maze() {
        let (w, start) = filled();
        let outcome = greedy(&w, start, &w.goal_locations()).unwrap();

        assert_eq!(outcome.path, coords(&[(3, 1), (3, 2)]));
    }

    #[test]
    fn test_greedy_commits_even_when_the_walk_is_long() {
        let (w, _) = small();
        let goals = coords(&[(1, 2), (3, 6)]);

        // (1, 2) is closer as the crow flies, but it takes the ladder to get there
        let outcome = greedy(&w, GridCoord::new(3, 2), &goals).unwrap();

        assert_eq!(outcome.target(), Some(GridCoord::new(1, 2)));
        assert_eq!(
            outcome.path,
            coords(&[(3, 2), (3, 3), (2, 3), (1, 3), (1, 2)])
        );
    }
}
