use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use types::{GridCoord, WalkabilityMatrix};

use super::{reconstruct_path, walkable_neighbors, SearchOutcome};

/// Breadth first search, the shortest path when every step costs the same
///
/// A cell is marked seen when it is queued, so it gets exactly one parent. The goal test happens
/// when a cell is taken off the queue, and that is also when it is recorded as visited.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(start = %start, targets = goals.len(), visited)
)]
pub fn bfs(
    walkability: &WalkabilityMatrix,
    start: GridCoord,
    goals: &[GridCoord],
) -> Option<SearchOutcome> {
    let mut to_search = VecDeque::from([start]);
    let mut seen = FxHashSet::default();
    let mut paths_from: FxHashMap<GridCoord, Option<GridCoord>> = FxHashMap::default();
    let mut visited = vec![];

    seen.insert(start);
    paths_from.insert(start, None);

    while let Some(coord) = to_search.pop_front() {
        visited.push(coord);

        if goals.contains(&coord) {
            tracing::Span::current().record("visited", visited.len());
            return Some(SearchOutcome {
                path: reconstruct_path(paths_from, coord),
                visited,
            });
        }

        for neighbor in walkable_neighbors(walkability, coord) {
            if seen.insert(neighbor) {
                paths_from.insert(neighbor, Some(coord));
                to_search.push_back(neighbor);
            }
        }
    }

    tracing::Span::current().record("visited", visited.len());
    None
}
