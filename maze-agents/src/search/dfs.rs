use rustc_hash::{FxHashMap, FxHashSet};
use types::{GridCoord, WalkabilityMatrix};

use super::{reconstruct_path, walkable_neighbors, SearchOutcome};

/// Depth first search
///
/// No optimality guarantee at all, this is the baseline the other searches get compared to. A
/// cell can sit on the stack more than once. Its parent is whoever pushed it last, which is also
/// the copy that gets popped first, and any later copy is skipped.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(start = %start, targets = goals.len(), visited)
)]
pub fn dfs(
    walkability: &WalkabilityMatrix,
    start: GridCoord,
    goals: &[GridCoord],
) -> Option<SearchOutcome> {
    let mut to_search = vec![start];
    let mut expanded = FxHashSet::default();
    let mut paths_from: FxHashMap<GridCoord, Option<GridCoord>> = FxHashMap::default();
    let mut visited = vec![];

    paths_from.insert(start, None);

    while let Some(coord) = to_search.pop() {
        if !expanded.insert(coord) {
            continue;
        }
        visited.push(coord);

        if goals.contains(&coord) {
            tracing::Span::current().record("visited", visited.len());
            return Some(SearchOutcome {
                path: reconstruct_path(paths_from, coord),
                visited,
            });
        }

        for neighbor in walkable_neighbors(walkability, coord) {
            if !expanded.contains(&neighbor) {
                paths_from.insert(neighbor, Some(coord));
                to_search.push(neighbor);
            }
        }
    }

    tracing::Span::current().record("visited", visited.len());
    None
}
