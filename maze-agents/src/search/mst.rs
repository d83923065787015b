use itertools::Itertools;
use types::GridCoord;

use super::Heuristic;

/// Visit order for a maze where every open cell holds a goal
///
/// The tree is grown Prim style from `start`, but always from the vertex that was added last:
/// each step connects the newest vertex to the closest goal not yet in the tree, using
/// [Heuristic::LadderAwareManhattan] as the edge weight. Ties go to the goal listed first. The
/// result is a chain of `(from, to)` edges and the `to` ends, in order, are the sub-goals the
/// filled maze planner walks to.
///
/// ```rust
/// use maze_agents::search::generate_mst;
/// use types::GridCoord;
///
/// let edges = generate_mst(
///     GridCoord::new(3, 1),
///     &[GridCoord::new(1, 1), GridCoord::new(3, 3)],
/// );
///
/// assert_eq!(
///     edges,
///     vec![
///         (GridCoord::new(3, 1), GridCoord::new(3, 3)),
///         (GridCoord::new(3, 3), GridCoord::new(1, 1)),
///     ]
/// );
/// ```
pub fn generate_mst(start: GridCoord, goals: &[GridCoord]) -> Vec<(GridCoord, GridCoord)> {
    let mut remaining = goals
        .iter()
        .copied()
        .filter(|g| *g != start)
        .unique()
        .collect_vec();
    let mut edges = Vec::with_capacity(remaining.len());
    let mut newest = start;

    while let Some(closest) = remaining
        .iter()
        .position_min_by_key(|g| Heuristic::LadderAwareManhattan.estimate(newest, **g))
    {
        let next = remaining.remove(closest);
        edges.push((newest, next));
        newest = next;
    }

    edges
}
