//! Every agent the maze can be played by, and the rules for which ones go together
//!
//! ```rust
//! use maze_agents::registry::{AgentConfig, AgentKind};
//!
//! let config = AgentConfig {
//!     kind: AgentKind::AStar,
//!     filled: true,
//!     ..Default::default()
//! };
//!
//! // Plain A* has no idea what to do with a maze full of diamonds
//! let resolved = config.validate().unwrap();
//! assert_eq!(resolved.kind, AgentKind::AStarFilled);
//! ```

use std::{fmt::Display, str::FromStr};

use anyhow::{bail, Result};
use maze_minimax::StrategyKind;
use serde::{Deserialize, Serialize};

use crate::{
    planner::{
        AdversarialOptions, AdversarialPlanner, BoxedPlanner, ChaserPlanner, GreedyPlanner,
        MstPlanner, RandomWalker, SearchAlgorithm, SearchOptions, SearchPlanner,
    },
    search::Heuristic,
    sim::MAX_ENEMIES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// The algorithms the main agent can run
pub enum AgentKind {
    #[allow(missing_docs)]
    Random,
    #[allow(missing_docs)]
    Bfs,
    #[allow(missing_docs)]
    Dfs,
    #[allow(missing_docs)]
    Ucs,
    #[allow(missing_docs)]
    AStar,
    /// A* ordered by a spanning tree, for filled mazes
    AStarFilled,
    #[allow(missing_docs)]
    Greedy,
    #[allow(missing_docs)]
    Minimax,
    #[allow(missing_docs)]
    AlphaBeta,
    #[allow(missing_docs)]
    Expectimax,
}

impl AgentKind {
    /// Every kind, in the order they are listed to users
    pub fn all() -> [AgentKind; 10] {
        [
            AgentKind::Random,
            AgentKind::Bfs,
            AgentKind::Dfs,
            AgentKind::Ucs,
            AgentKind::AStar,
            AgentKind::AStarFilled,
            AgentKind::Greedy,
            AgentKind::Minimax,
            AgentKind::AlphaBeta,
            AgentKind::Expectimax,
        ]
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Bfs => "bfs",
            AgentKind::Dfs => "dfs",
            AgentKind::Ucs => "ucs",
            AgentKind::AStar => "astar",
            AgentKind::AStarFilled => "astar-filled",
            AgentKind::Greedy => "greedy",
            AgentKind::Minimax => "minimax",
            AgentKind::AlphaBeta => "alphabeta",
            AgentKind::Expectimax => "expectimax",
        }
    }

    /// A short explanation of the algorithm for users
    pub fn explain(&self) -> &'static str {
        match self {
            AgentKind::Random => {
                "Random algorithm chooses a random path to take, which may not be optimal."
            }
            AgentKind::Bfs => {
                "Breadth First Search (BFS) explores all neighbors at the present depth prior to \
                 moving on to nodes at the next depth level."
            }
            AgentKind::Dfs => {
                "Depth First Search (DFS) explores as far as possible along each branch before \
                 backtracking."
            }
            AgentKind::Ucs => {
                "Uniform Cost Search (UCS) is a search algorithm that expands the least cost \
                 node first."
            }
            AgentKind::AStar => {
                "A* is a graph traversal and pathfinding algorithm that is efficient and finds \
                 the shortest path."
            }
            AgentKind::AStarFilled => {
                "A* over a maze full of diamonds, visiting them in the order of a spanning tree \
                 grown from the agent."
            }
            AgentKind::Greedy => {
                "Greedy Best-First Search algorithm selects the path that appears to be the best \
                 at the moment."
            }
            AgentKind::Minimax => {
                "Minimax looks a few moves ahead assuming every enemy plays its best move \
                 against the agent."
            }
            AgentKind::AlphaBeta => {
                "Alpha-beta pruning finds the same move as minimax while skipping branches that \
                 can't change the result."
            }
            AgentKind::Expectimax => {
                "Expectimax treats one enemy as moving at random and averages over its moves \
                 instead of assuming the worst."
            }
        }
    }

    /// Whether the agent can play a maze where every open cell holds a diamond
    pub fn filled_compatible(&self) -> bool {
        matches!(
            self,
            AgentKind::Random | AgentKind::AStar | AgentKind::AStarFilled | AgentKind::Greedy
        ) || self.is_adversarial()
    }

    /// Whether the agent plans against enemies
    pub fn is_adversarial(&self) -> bool {
        self.strategy().is_some()
    }

    /// The game tree search behind an adversarial kind
    pub fn strategy(&self) -> Option<StrategyKind> {
        match self {
            AgentKind::Minimax => Some(StrategyKind::Minimax),
            AgentKind::AlphaBeta => Some(StrategyKind::AlphaBeta),
            AgentKind::Expectimax => Some(StrategyKind::Expectimax),
            _ => None,
        }
    }
}

impl Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AgentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match AgentKind::all().into_iter().find(|k| k.name() == s) {
            Some(kind) => Ok(kind),
            None => bail!(
                "Unknown algorithm {}, expected one of {}",
                s,
                AgentKind::all().map(|k| k.name()).join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How the enemies move
pub enum EnemyKind {
    /// Wander at random
    Random,
    /// Run along the shortest path to the main agent
    Chaser,
    /// Search the same game tree as an adversarial main agent, as the minimizing side
    Adversarial,
}

impl Default for EnemyKind {
    fn default() -> Self {
        EnemyKind::Chaser
    }
}

impl EnemyKind {
    #[allow(missing_docs)]
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Random => "random",
            EnemyKind::Chaser => "chaser",
            EnemyKind::Adversarial => "adversarial",
        }
    }
}

impl FromStr for EnemyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(EnemyKind::Random),
            "chaser" => Ok(EnemyKind::Chaser),
            "adversarial" => Ok(EnemyKind::Adversarial),
            other => bail!("Unknown enemy kind {}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Everything needed to build the planners of a match
pub struct AgentConfig {
    /// The main agent's algorithm
    pub kind: AgentKind,
    /// Use [Heuristic::WeightedManhattan], only valid for A*
    pub weighted: bool,
    /// Whether the maze is filled with diamonds
    pub filled: bool,
    #[allow(missing_docs)]
    pub enemy_count: usize,
    #[allow(missing_docs)]
    pub enemy_kind: EnemyKind,
    #[allow(missing_docs)]
    pub search: SearchOptions,
    #[allow(missing_docs)]
    pub adversarial: AdversarialOptions,
    /// Seed for random walkers, `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            kind: AgentKind::Bfs,
            weighted: false,
            filled: false,
            enemy_count: 0,
            enemy_kind: EnemyKind::default(),
            search: SearchOptions::default(),
            adversarial: AdversarialOptions::default(),
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Check the combination of options, resolving plain A* on a filled maze to
    /// [AgentKind::AStarFilled]
    pub fn validate(mut self) -> Result<Self> {
        if self.weighted && !matches!(self.kind, AgentKind::AStar | AgentKind::AStarFilled) {
            bail!("--weighted is only applicable when using the A* algorithm.");
        }
        if self.filled && !self.kind.filled_compatible() {
            bail!(
                "Filled mazes only work with the greedy, random, astar or adversarial agents, not {}.",
                self.kind
            );
        }
        if self.kind.is_adversarial() && self.enemy_count == 0 {
            bail!("{} requires at least one enemy to be present.", self.kind);
        }
        if self.enemy_count > MAX_ENEMIES {
            bail!("Enemy count cannot be greater than {}.", MAX_ENEMIES);
        }
        if self.kind == AgentKind::Expectimax
            && !(1..=self.enemy_count).contains(&self.adversarial.stochastic_enemy)
        {
            bail!(
                "The random enemy for expectimax must be one of the {} enemies, got {}.",
                self.enemy_count,
                self.adversarial.stochastic_enemy
            );
        }

        if self.filled && self.kind == AgentKind::AStar {
            self.kind = AgentKind::AStarFilled;
        }

        Ok(self)
    }

    /// The search options with the weighted flag applied
    pub fn search_options(&self) -> SearchOptions {
        if self.weighted {
            SearchOptions {
                heuristic: Heuristic::WeightedManhattan,
                ..self.search
            }
        } else {
            self.search
        }
    }

    fn random_walker(&self, offset: u64) -> RandomWalker {
        match self.seed {
            Some(seed) => RandomWalker::seeded(seed.wrapping_add(offset)),
            None => RandomWalker::default(),
        }
    }

    /// The planner for the main agent
    pub fn build_planner(&self) -> BoxedPlanner {
        let search = self.search_options();

        match self.kind {
            AgentKind::Random => Box::new(self.random_walker(0)),
            AgentKind::Bfs => Box::new(SearchPlanner::new(SearchAlgorithm::Bfs, search)),
            AgentKind::Dfs => Box::new(SearchPlanner::new(SearchAlgorithm::Dfs, search)),
            AgentKind::Ucs => Box::new(SearchPlanner::new(SearchAlgorithm::Ucs, search)),
            AgentKind::AStar => Box::new(SearchPlanner::new(SearchAlgorithm::AStar, search)),
            AgentKind::AStarFilled => Box::new(MstPlanner::new(search)),
            AgentKind::Greedy => Box::new(GreedyPlanner),
            AgentKind::Minimax | AgentKind::AlphaBeta | AgentKind::Expectimax => {
                let strategy = self.kind.strategy().unwrap_or(StrategyKind::Minimax);
                Box::new(AdversarialPlanner::new(strategy, self.adversarial, 0))
            }
        }
    }

    /// The planner for enemy number `enemy` (agent index `enemy + 1`)
    ///
    /// Adversarial enemies search with the main agent's strategy when it has one and with
    /// minimax otherwise.
    pub fn build_enemy(&self, enemy: usize) -> BoxedPlanner {
        match self.enemy_kind {
            EnemyKind::Random => Box::new(self.random_walker(enemy as u64 + 1)),
            EnemyKind::Chaser => Box::new(ChaserPlanner),
            EnemyKind::Adversarial => {
                let strategy = self.kind.strategy().unwrap_or(StrategyKind::Minimax);
                Box::new(AdversarialPlanner::new(strategy, self.adversarial, enemy + 1))
            }
        }
    }

    /// The planner for every enemy
    pub fn build_enemies(&self) -> Vec<BoxedPlanner> {
        (0..self.enemy_count).map(|i| self.build_enemy(i)).collect()
    }
}
