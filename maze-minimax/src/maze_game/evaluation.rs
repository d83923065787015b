use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use types::{GridCoord, WalkabilityMatrix};

#[derive(Debug, Clone, Copy, PartialEq)]
/// The constants of the maze evaluation function
///
/// For a state that is neither won nor lost the score is
///
/// ```text
///   - enemy / (d_enemy + 1)
///   - danger / (d_enemy + 1)          if the real enemy distance <= danger_radius
///   + goal / (d_goal + 1)
///   + collected * diamond_count * (depth + 1)
///   - idle                            if the main agent had no move
/// ```
///
/// where the distances are walking distances in the simulated state and the real distance is the
/// one between the agents at the root of the search. Terms whose distance is unreachable are
/// left out.
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use maze_minimax::EvaluationWeights;
///
/// let defaults = EvaluationWeights::default();
///
/// assert_eq!(defaults.enemy, 100.0);
/// assert_eq!(defaults.danger_radius, 3);
/// assert_eq!(defaults.danger, 400.0);
/// assert_eq!(defaults.goal, 10.0);
/// assert_eq!(defaults.collected, 50.0);
/// assert_eq!(defaults.idle, 1.0);
/// ```
pub struct EvaluationWeights {
    /// Penalty for being near an enemy in the simulated state
    pub enemy: f64,
    /// How close (in steps) the real enemy must be before `danger` kicks in
    pub danger_radius: usize,
    /// Extra penalty for being near an enemy while one is actually close
    pub danger: f64,
    /// Reward for being near the closest remaining goal
    pub goal: f64,
    /// Reward per collected goal, per remaining round of search
    pub collected: f64,
    /// Penalty for a branch where the main agent could not move
    pub idle: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            enemy: 100.0,
            danger_radius: 3,
            danger: 400.0,
            goal: 10.0,
            collected: 50.0,
            idle: 1.0,
        }
    }
}

/// Walking distance from `start` to the closest of `targets`
///
/// This is a plain breadth first search over walkable cells. Returns `None` when there are no
/// targets or none of them can be reached.
pub fn shortest_distance(
    walkability: &WalkabilityMatrix,
    start: GridCoord,
    targets: &[GridCoord],
) -> Option<usize> {
    if targets.is_empty() {
        return None;
    }

    let mut seen = FxHashSet::default();
    let mut to_search = VecDeque::new();
    seen.insert(start);
    to_search.push_back((start, 0));

    while let Some((coord, distance)) = to_search.pop_front() {
        if targets.contains(&coord) {
            return Some(distance);
        }

        for neighbor in coord.neighbors() {
            if walkability.is_walkable(neighbor) && seen.insert(neighbor) {
                to_search.push_back((neighbor, distance + 1));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::MazeFixture;

    fn small() -> (WalkabilityMatrix, GridCoord) {
        let fixture = MazeFixture::from_json(include_str!("../../../types/fixtures/small.json"))
            .unwrap();
        (WalkabilityMatrix::compute(&fixture.maze), fixture.start)
    }

    #[test]
    fn test_distance_over_the_ladder() {
        let (w, start) = small();

        assert_eq!(
            shortest_distance(&w, start, &[GridCoord::new(1, 7)]),
            Some(8)
        );
    }

    #[test]
    fn test_distance_to_closest_target() {
        let (w, start) = small();

        assert_eq!(
            shortest_distance(&w, start, &[GridCoord::new(1, 7), GridCoord::new(3, 4)]),
            Some(3)
        );
        assert_eq!(shortest_distance(&w, start, &[start]), Some(0));
    }

    #[test]
    fn test_unreachable_distance() {
        let (w, start) = small();

        assert_eq!(shortest_distance(&w, start, &[]), None);
        assert_eq!(shortest_distance(&w, start, &[GridCoord::new(0, 0)]), None);
    }
}
