//! Run every path search on the same maze side by side

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use types::{GridCoord, WalkabilityMatrix};

use crate::search::{a_star, bfs, dfs, greedy, path_cost, ucs, CostModel, Heuristic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// One search configuration taking part in a comparison
pub enum Contender {
    #[allow(missing_docs)]
    Bfs,
    #[allow(missing_docs)]
    Dfs,
    #[allow(missing_docs)]
    Ucs,
    #[allow(missing_docs)]
    AStar(Heuristic),
    #[allow(missing_docs)]
    Greedy,
}

impl Contender {
    /// Every contender, cheapest bookkeeping first
    pub fn all() -> Vec<Contender> {
        vec![
            Contender::Bfs,
            Contender::Dfs,
            Contender::Ucs,
            Contender::AStar(Heuristic::Manhattan),
            Contender::AStar(Heuristic::WeightedManhattan),
            Contender::AStar(Heuristic::LadderAwareManhattan),
            Contender::Greedy,
        ]
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &'static str {
        match self {
            Contender::Bfs => "bfs",
            Contender::Dfs => "dfs",
            Contender::Ucs => "ucs",
            Contender::AStar(Heuristic::Zero) => "astar (zero)",
            Contender::AStar(Heuristic::Manhattan) => "astar",
            Contender::AStar(Heuristic::WeightedManhattan) => "astar (weighted)",
            Contender::AStar(Heuristic::LadderAwareManhattan) => "astar (ladder aware)",
            Contender::Greedy => "greedy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// How one contender did
pub struct SearchReport {
    #[allow(missing_docs)]
    pub contender: Contender,
    /// Cells on the path, `None` when no path was found
    pub path_len: Option<usize>,
    /// Cost of the path under the comparison's cost model
    pub cost: Option<i64>,
    /// Cells expanded
    pub visited: usize,
    #[allow(missing_docs)]
    pub elapsed: Duration,
}

/// Run every [Contender] from `start` to `goals`, in parallel
///
/// Reports come back in [Contender::all] order.
pub fn compare_searches(
    walkability: &WalkabilityMatrix,
    start: GridCoord,
    goals: &[GridCoord],
    cost_model: CostModel,
) -> Vec<SearchReport> {
    Contender::all()
        .into_par_iter()
        .map(|contender| {
            let started = Instant::now();
            let outcome = match contender {
                Contender::Bfs => bfs(walkability, start, goals),
                Contender::Dfs => dfs(walkability, start, goals),
                Contender::Ucs => ucs(walkability, start, goals, cost_model),
                Contender::AStar(h) => a_star(walkability, start, goals, cost_model, h),
                Contender::Greedy => greedy(walkability, start, goals),
            };
            let elapsed = started.elapsed();

            SearchReport {
                contender,
                path_len: outcome.as_ref().map(|o| o.path.len()),
                cost: outcome
                    .as_ref()
                    .map(|o| path_cost(walkability, &o.path, cost_model)),
                visited: outcome.as_ref().map_or(0, |o| o.visited.len()),
                elapsed,
            }
        })
        .collect()
}
